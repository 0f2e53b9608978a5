//! URL state encoding/decoding for shareable URLs.
//!
//! Encodes the displayed timestep in the URL query string so reloading
//! restores it and URLs can be shared. `play=0` disables autoplay.

/// Parsed URL parameters.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UrlParams {
    pub step: Option<f64>,
    pub play: Option<bool>,
}

/// Parses a query string such as `?step=0.08&play=0`.
pub fn parse_query(query: &str) -> UrlParams {
    let mut params = UrlParams::default();

    let query = query.trim_start_matches('?');
    if query.is_empty() {
        return params;
    }

    for pair in query.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        let value = kv.next().unwrap_or("");
        match key {
            "step" => params.step = value.parse().ok().filter(|v: &f64| v.is_finite()),
            "play" => {
                params.play = match value {
                    "1" | "true" => Some(true),
                    "0" | "false" => Some(false),
                    _ => None,
                }
            }
            _ => {}
        }
    }

    params
}

/// Query string for the displayed step. `play` is written only when the
/// page was opened with it.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn format_query(step_label: &str, play: Option<bool>) -> String {
    match play {
        Some(play) => format!("?step={}&play={}", step_label, u8::from(play)),
        None => format!("?step={}", step_label),
    }
}

/// Parse URL query parameters from the current browser URL.
#[cfg(target_arch = "wasm32")]
pub fn parse_from_url() -> UrlParams {
    let Some(window) = web_sys::window() else {
        return UrlParams::default();
    };
    match window.location().search() {
        Ok(search) => parse_query(&search),
        Err(_) => UrlParams::default(),
    }
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn parse_from_url() -> UrlParams {
    UrlParams::default()
}

/// Push the displayed step to the URL query string using `replaceState`.
#[cfg(target_arch = "wasm32")]
pub fn push_to_url(step_label: &str, play: Option<bool>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        return;
    };
    let _ = history.replace_state_with_url(
        &wasm_bindgen::JsValue::NULL,
        "",
        Some(&format_query(step_label, play)),
    );
}

/// No-op stub for native builds.
#[cfg(not(target_arch = "wasm32"))]
pub fn push_to_url(_step_label: &str, _play: Option<bool>) {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_step_and_play() {
        let params = parse_query("?step=0.08&play=0");
        assert_eq!(params.step, Some(0.08));
        assert_eq!(params.play, Some(false));
    }

    #[test]
    fn test_parse_ignores_junk() {
        let params = parse_query("?step=abc&play=maybe&zoom=3");
        assert_eq!(params, UrlParams::default());
        assert_eq!(parse_query(""), UrlParams::default());
        assert_eq!(parse_query("?step=NaN").step, None);
    }

    #[test]
    fn test_format_round_trips_through_parse() {
        let params = parse_query(&format_query("0.11", None));
        assert_eq!(params.step, Some(0.11));
        assert_eq!(params.play, None);
    }

    #[test]
    fn test_format_keeps_play_param() {
        assert_eq!(format_query("0.08", Some(false)), "?step=0.08&play=0");
        assert_eq!(format_query("0.08", Some(true)), "?step=0.08&play=1");

        let params = parse_query(&format_query("0.08", Some(false)));
        assert_eq!(params.step, Some(0.08));
        assert_eq!(params.play, Some(false));
    }
}
