//! Content-Type lookup
//!
//! Fixed extension-to-MIME-type table used for the Content-Type response
//! header. The table is built once, never mutated, and unknown or missing
//! extensions fall back to application/octet-stream.

use std::collections::HashMap;
use std::path::Path;

use lazy_static::lazy_static;

/// MIME type served when the extension is unknown or absent.
pub const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

lazy_static! {
    static ref MIME_TYPES: HashMap<&'static str, &'static str> = {
        let mut types = HashMap::new();
        types.insert("asf", "video/x-ms-asf");
        types.insert("asx", "video/x-ms-asf");
        types.insert("avi", "video/x-msvideo");
        types.insert("bin", "application/octet-stream");
        types.insert("cco", "application/x-cocoa");
        types.insert("crt", "application/x-x509-ca-cert");
        types.insert("css", "text/css");
        types.insert("deb", "application/octet-stream");
        types.insert("der", "application/x-x509-ca-cert");
        types.insert("dll", "application/octet-stream");
        types.insert("dmg", "application/octet-stream");
        types.insert("ear", "application/java-archive");
        types.insert("eot", "application/octet-stream");
        types.insert("exe", "application/octet-stream");
        types.insert("flv", "video/x-flv");
        types.insert("gif", "image/gif");
        types.insert("hqx", "application/mac-binhex40");
        types.insert("htc", "text/x-component");
        types.insert("htm", "text/html");
        types.insert("html", "text/html");
        types.insert("ico", "image/x-icon");
        types.insert("img", "application/octet-stream");
        types.insert("iso", "application/octet-stream");
        types.insert("jar", "application/java-archive");
        types.insert("jardiff", "application/x-java-archive-diff");
        types.insert("jng", "image/x-jng");
        types.insert("jnlp", "application/x-java-jnlp-file");
        types.insert("jpeg", "image/jpeg");
        types.insert("jpg", "image/jpeg");
        types.insert("js", "application/x-javascript");
        types.insert("mml", "text/mathml");
        types.insert("mng", "video/x-mng");
        types.insert("mov", "video/quicktime");
        types.insert("mp3", "audio/mpeg");
        types.insert("mpeg", "video/mpeg");
        types.insert("mpg", "video/mpeg");
        types.insert("msi", "application/octet-stream");
        types.insert("msm", "application/octet-stream");
        types.insert("msp", "application/octet-stream");
        types.insert("pdb", "application/x-pilot");
        types.insert("pdf", "application/pdf");
        types.insert("pem", "application/x-x509-ca-cert");
        types.insert("pl", "application/x-perl");
        types.insert("pm", "application/x-perl");
        types.insert("png", "image/png");
        types.insert("prc", "application/x-pilot");
        types.insert("ra", "audio/x-realaudio");
        types.insert("rar", "application/x-rar-compressed");
        types.insert("rpm", "application/x-redhat-package-manager");
        types.insert("rss", "text/xml");
        types.insert("run", "application/x-makeself");
        types.insert("sea", "application/x-sea");
        types.insert("shtml", "text/html");
        types.insert("sit", "application/x-stuffit");
        types.insert("swf", "application/x-shockwave-flash");
        types.insert("tcl", "application/x-tcl");
        types.insert("tk", "application/x-tcl");
        types.insert("txt", "text/plain");
        types.insert("war", "application/java-archive");
        types.insert("wbmp", "image/vnd.wap.wbmp");
        types.insert("wmv", "video/x-ms-wmv");
        types.insert("xml", "text/xml");
        types.insert("xpi", "application/x-xpinstall");
        types.insert("zip", "application/zip");
        types
    };
}

/// Look up the MIME type for a file extension.
///
/// The extension may be given with or without its leading dot, in any case.
pub fn mime_type_for_extension(extension: &str) -> &'static str {
    let ext = extension.trim_start_matches('.').to_ascii_lowercase();
    MIME_TYPES
        .get(ext.as_str())
        .copied()
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Look up the MIME type for a path from its extension.
pub fn mime_type_for_path(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => mime_type_for_extension(ext),
        None => FALLBACK_MIME_TYPE,
    }
}
