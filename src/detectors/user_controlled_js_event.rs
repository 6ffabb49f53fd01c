// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

/**
 * Bountyy Oy - User-Controlled JavaScript Event Detector
 * Flags request parameter values reflected, unescaped, into inline
 * JavaScript event handler attributes of the response page
 *
 * @copyright 2026 Bountyy Oy
 * @license Proprietary - Enterprise Edition
 */

use once_cell::sync::Lazy;
use scraper::Html;
use tracing::debug;

use crate::classifier;
use crate::message::{HttpMessage, Parameter};
use crate::tags::{self, TagMap};
use crate::types::{Alert, AlertBuilder, AlertSink, AlertThreshold, Confidence, Risk};

use super::PassiveDetector;

pub const PLUGIN_ID: u32 = 10043;
const NAME: &str = "User Controlled JavaScript Event";

/// Known inline event handler attribute names, sorted for binary search.
const JAVASCRIPT_EVENTS: &[&str] = &[
    "onabort",
    "onbeforeunload",
    "onblur",
    "onchange",
    "onclick",
    "oncontextmenu",
    "ondblclick",
    "ondrag",
    "ondragend",
    "ondragenter",
    "ondragleave",
    "ondragover",
    "ondragstart",
    "ondrop",
    "onerror",
    "onfocus",
    "onhashchange",
    "onkeydown",
    "onkeypress",
    "onkeyup",
    "onload",
    "onmessage",
    "onmousedown",
    "onmousemove",
    "onmouseout",
    "onmouseover",
    "onmouseup",
    "onmousewheel",
    "onoffline",
    "ononline",
    "onpopstate",
    "onreset",
    "onresize",
    "onscroll",
    "onselect",
    "onstorage",
    "onsubmit",
    "onunload",
];

static ALERT_TAGS: Lazy<TagMap> = Lazy::new(|| {
    tags::tag_map(&[
        tags::OWASP_2021_A03_INJECTION,
        tags::OWASP_2017_A01_INJECTION,
        (tags::POLICY_PENTEST, ""),
    ])
});

pub struct UserControlledJsEventDetector {
    threshold: AlertThreshold,
}

impl UserControlledJsEventDetector {
    pub fn new() -> Self {
        Self {
            threshold: AlertThreshold::default(),
        }
    }

    pub fn with_threshold(threshold: AlertThreshold) -> Self {
        Self { threshold }
    }

    fn is_event_attribute(name: &str) -> bool {
        JAVASCRIPT_EVENTS
            .binary_search(&name.to_lowercase().as_str())
            .is_ok()
    }

    /// Rudimentary parse of the handler body: split on the statement and
    /// assignment delimiters, then look for a token that is exactly the
    /// parameter value.
    fn value_reflected(attribute_value: &str, param_value: &str) -> bool {
        attribute_value
            .split([';', '=', ',', ':'])
            .any(|token| token.eq_ignore_ascii_case(param_value))
    }

    fn build_alert(
        &self,
        url: &str,
        attribute: &str,
        attribute_value: &str,
        param: &Parameter,
    ) -> AlertBuilder {
        AlertBuilder::new(PLUGIN_ID, NAME)
            .risk(Risk::Info)
            .confidence(Confidence::Low)
            .description(
                "A request parameter value appears, unescaped, inside an inline \
                 JavaScript event handler attribute of the response. User input \
                 flowing into script context may be exploitable for cross-site \
                 scripting.",
            )
            .param(&param.name)
            .evidence(attribute_value)
            .other_info(format!(
                "User-input was found in the following location:\n\
                 {}\n\
                 Event attribute: {}={:?}\n\
                 Parameter value: {:?}",
                url, attribute, attribute_value, param.value
            ))
            .solution(
                "Validate all input and sanitize output it before writing to any \
                 JavaScript event handler. Use a safe encoding library for values \
                 emitted into script context.",
            )
            .references("https://owasp.org/www-community/attacks/xss/")
            // CWE-20: Improper Input Validation
            .cwe_id(20)
            // WASC-20: Improper Input Handling
            .wasc_id(20)
    }
}

impl Default for UserControlledJsEventDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl PassiveDetector for UserControlledJsEventDetector {
    fn plugin_id(&self) -> u32 {
        PLUGIN_ID
    }

    fn name(&self) -> &'static str {
        NAME
    }

    fn alert_tags(&self) -> &'static TagMap {
        &ALERT_TAGS
    }

    fn threshold(&self) -> AlertThreshold {
        self.threshold
    }

    fn set_threshold(&mut self, threshold: AlertThreshold) {
        self.threshold = threshold;
    }

    fn inspect(&self, msg: &HttpMessage, sink: &mut dyn AlertSink) {
        if !classifier::is_page_200(msg) || !classifier::is_html(msg) {
            return;
        }

        // Deduplicated, sorted URL + form parameters; empty values are never
        // alert-worthy
        let params = msg.all_params();
        if params.is_empty() {
            return;
        }

        debug!("Checking {} for reflected event handler input", msg.request.uri);

        let document = Html::parse_document(&msg.response.body);
        for node in document.tree.nodes() {
            let element = match node.value().as_element() {
                Some(element) => element,
                None => continue,
            };
            for (attr_name, attr_value) in element.attrs() {
                if !Self::is_event_attribute(attr_name) {
                    continue;
                }
                for param in &params {
                    if param.value.is_empty() {
                        continue;
                    }
                    if Self::value_reflected(attr_value, &param.value) {
                        sink.raise(
                            self.build_alert(&msg.request.uri, attr_name, attr_value, param)
                                .build(),
                        );
                    }
                }
            }
        }
    }

    fn example_alerts(&self) -> Vec<Alert> {
        vec![self
            .build_alert(
                "http://example.com/i.php?place=moon&name=Foo",
                "onerror",
                "foo",
                &Parameter {
                    name: "name".to_string(),
                    value: "foo".to_string(),
                    origin: crate::message::ParamOrigin::Url,
                },
            )
            .build()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{HttpRequest, HttpResponse};

    fn html_message(uri: &str, body: &str) -> HttpMessage {
        let mut response = HttpResponse::new(200);
        response
            .headers
            .push(("Content-Type".to_string(), "text/html".to_string()));
        response.body = body.to_string();
        HttpMessage::new(HttpRequest::new("GET", uri), response)
    }

    fn scan(msg: &HttpMessage) -> Vec<Alert> {
        let mut alerts = Vec::new();
        UserControlledJsEventDetector::new().inspect(msg, &mut alerts);
        alerts
    }

    #[test]
    fn test_reflected_parameter_in_onerror() {
        let msg = html_message(
            "https://example.com/i.php?name=foo",
            r#"<html><body><img src="x" onerror="alert(1);foo"></body></html>"#,
        );
        let alerts = scan(&msg);

        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].param.as_deref(), Some("name"));
        assert_eq!(alerts[0].evidence, "alert(1);foo");
        assert!(alerts[0].other_info.as_deref().unwrap().contains("onerror"));
    }

    #[test]
    fn test_no_parameters_short_circuits() {
        let msg = html_message(
            "https://example.com/static.html",
            r#"<img src="x" onerror="alert(1);foo">"#,
        );
        assert!(scan(&msg).is_empty(), "No request parameters, nothing to reflect");
    }

    #[test]
    fn test_empty_parameter_value_never_matches() {
        let msg = html_message(
            "https://example.com/i.php?name=",
            r#"<img src="x" onerror=";;">"#,
        );
        assert!(
            scan(&msg).is_empty(),
            "Empty split tokens must not match empty parameter values"
        );
    }

    #[test]
    fn test_non_html_response_skipped() {
        let mut response = HttpResponse::new(200);
        response
            .headers
            .push(("Content-Type".to_string(), "application/json".to_string()));
        response.body = r#"{"x": "<img onerror=\"foo\">"}"#.to_string();
        let msg = HttpMessage::new(
            HttpRequest::new("GET", "https://example.com/api?name=foo"),
            response,
        );
        assert!(scan(&msg).is_empty());
    }

    #[test]
    fn test_non_200_or_empty_body_skipped() {
        let mut msg = html_message(
            "https://example.com/i.php?name=foo",
            r#"<img onerror="foo">"#,
        );
        msg.response.status_code = 404;
        assert!(scan(&msg).is_empty());

        let mut msg = html_message("https://example.com/i.php?name=foo", "");
        msg.response.status_code = 200;
        assert!(scan(&msg).is_empty());
    }

    #[test]
    fn test_match_is_case_insensitive_and_token_exact() {
        let msg = html_message(
            "https://example.com/i.php?cb=doIt",
            r#"<body onload="x=1;DOIT"></body>"#,
        );
        let alerts = scan(&msg);
        assert_eq!(alerts.len(), 1);

        // Substring-only presence is not a token match
        let msg = html_message(
            "https://example.com/i.php?cb=doIt",
            r#"<body onload="x=1;doItNow()"></body>"#,
        );
        assert!(scan(&msg).is_empty());
    }

    #[test]
    fn test_non_event_attributes_ignored() {
        let msg = html_message(
            "https://example.com/i.php?name=foo",
            r#"<div title="foo" data-x="foo">hi</div>"#,
        );
        assert!(scan(&msg).is_empty());
    }

    #[test]
    fn test_form_parameters_also_checked() {
        let mut request = HttpRequest::new("POST", "https://example.com/submit");
        request.headers.push((
            "Content-Type".to_string(),
            "application/x-www-form-urlencoded".to_string(),
        ));
        request.body = "comment=hello".to_string();
        let mut response = HttpResponse::new(200);
        response
            .headers
            .push(("Content-Type".to_string(), "text/html".to_string()));
        response.body = r#"<div onclick="hello">ok</div>"#.to_string();

        let alerts = scan(&HttpMessage::new(request, response));
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].param.as_deref(), Some("comment"));
    }

    #[test]
    fn test_event_list_is_sorted_for_binary_search() {
        let mut sorted = JAVASCRIPT_EVENTS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, JAVASCRIPT_EVENTS);
    }

    #[test]
    fn test_example_alert_metadata() {
        let examples = UserControlledJsEventDetector::new().example_alerts();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].plugin_id, PLUGIN_ID);
        assert_eq!(examples[0].param.as_deref(), Some("name"));
        assert_eq!(examples[0].cwe_id, 20);
    }
}
