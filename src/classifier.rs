// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - Resource Classifier
 * Stateless resource-type and status-code predicates over captured
 * messages, used by detectors to gate their checks
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use crate::message::HttpMessage;
use url::Url;

const IMAGE_EXTENSIONS: &[&str] = &[
    ".gif", ".jpg", ".jpeg", ".png", ".ico", ".icns", ".bmp", ".svg", ".webp",
];
const FONT_EXTENSIONS: &[&str] = &[".woff", ".woff2", ".ttf", ".otf", ".eot"];

/// Content-Type of the response, lowercased; empty string when absent.
fn content_type(msg: &HttpMessage) -> String {
    msg.response
        .header("content-type")
        .map(|ct| ct.to_lowercase())
        .unwrap_or_default()
}

/// Lowercased path of the request URI, for extension fallbacks when the
/// server sent no usable Content-Type.
fn request_path(msg: &HttpMessage) -> String {
    match Url::parse(&msg.request.uri) {
        Ok(url) => url.path().to_lowercase(),
        Err(_) => msg.request.uri.to_lowercase(),
    }
}

/// True for text/html and the XHTML content types. Best-effort: servers that
/// mislabel feeds as text/html will still classify as HTML.
pub fn is_html(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    ct.contains("text/html") || ct.contains("application/xhtml+xml") || ct.contains("application/xhtml")
}

pub fn is_javascript(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    if ct.contains("javascript") || ct.contains("ecmascript") {
        return true;
    }
    ct.is_empty() && request_path(msg).ends_with(".js")
}

pub fn is_css(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    if ct.contains("text/css") {
        return true;
    }
    ct.is_empty() && request_path(msg).ends_with(".css")
}

pub fn is_image(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    if ct.starts_with("image/") {
        return true;
    }
    let path = request_path(msg);
    ct.is_empty() && IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

pub fn is_font(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    if ct.starts_with("font/") || ct.contains("application/font") || ct.contains("application/vnd.ms-fontobject") {
        return true;
    }
    let path = request_path(msg);
    ct.is_empty() && FONT_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Covers HTML, XML, JSON and plain text. JS and CSS also count as text
/// here; callers that want them excluded combine with is_javascript/is_css.
pub fn is_text(msg: &HttpMessage) -> bool {
    let ct = content_type(msg);
    ct.starts_with("text/")
        || ct.contains("json")
        || ct.contains("xml")
        || ct.contains("javascript")
        || ct.contains("ecmascript")
}

pub fn is_redirect(status: u16) -> bool {
    (300..400).contains(&status)
}

pub fn is_client_error(status: u16) -> bool {
    (400..500).contains(&status)
}

pub fn is_server_error(status: u16) -> bool {
    (500..600).contains(&status)
}

/// A substantive 200 page: status 200 with a non-empty body. Detectors that
/// need actual content to inspect use this, not a bare status check.
pub fn is_page_200(msg: &HttpMessage) -> bool {
    msg.response.status_code == 200 && !msg.response.body.is_empty()
}
