use chrono::{DateTime, TimeZone};
use js_sys::{Date, Object, Reflect};
use shared::time::parse_timestamp;
use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::services::page::{DATETIME_ATTR, TIME_TAG};

const LONG_FORMAT: [(&str, &str); 7] = [
    ("weekday", "long"),
    ("year", "numeric"),
    ("month", "long"),
    ("day", "numeric"),
    ("hour", "numeric"),
    ("minute", "numeric"),
    ("timeZoneName", "long"),
];

/// Render an instant in the viewer's locale and timezone,
/// e.g. "Monday, October 19, 2026 at 10:00 AM Central European Summer Time".
pub fn format_long<Tz: TimeZone>(instant: &DateTime<Tz>) -> Option<String> {
    let options = long_format_options()
        .map_err(|e| tracing::warn!("Failed to build date format options: {:?}", e))
        .ok()?;
    let date = Date::new(&JsValue::from_f64(instant.timestamp_millis() as f64));
    date.to_locale_date_string("default", &options).as_string()
}

fn long_format_options() -> Result<Object, JsValue> {
    let options = Object::new();
    for (key, value) in LONG_FORMAT {
        Reflect::set(&options, &JsValue::from_str(key), &JsValue::from_str(value))?;
    }
    Ok(options)
}

/// Replace the text of every `<time datetime=…>` below `root` with its localized form.
///
/// Returns how many elements were rewritten.
pub fn localize_timestamps(root: &Element) -> usize {
    let times = root.get_elements_by_tag_name(TIME_TAG);
    let mut localized = 0;

    for time in (0..times.length()).filter_map(|i| times.item(i)) {
        let Some(raw) = time.get_attribute(DATETIME_ATTR) else {
            continue;
        };
        match parse_timestamp(&raw).and_then(|instant| format_long(&instant)) {
            Some(text) => {
                time.set_text_content(Some(&text));
                localized += 1;
            }
            None => tracing::warn!("Leaving unparsable timestamp as is: {:?}", raw),
        }
    }

    localized
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_format_long_mentions_year() {
        let instant = parse_timestamp("2021-04-13T19:00:00+03:00").unwrap();
        let text = format_long(&instant).unwrap();
        assert!(text.contains("2021"), "{}", text);
    }

    #[wasm_bindgen_test]
    fn test_localize_skips_bad_timestamps() {
        let document = gloo::utils::document();
        let root = document.create_element("div").unwrap();
        root.set_inner_html(
            r#"<time datetime="2021-04-13T19:00:00+03:00">raw</time>
               <time datetime="whenever">raw</time>
               <time>raw</time>"#,
        );

        assert_eq!(localize_timestamps(&root), 1);

        let times = root.get_elements_by_tag_name(TIME_TAG);
        let first = times.item(0).unwrap().text_content().unwrap();
        assert_ne!(first, "raw");
        assert_eq!(times.item(1).unwrap().text_content().unwrap(), "raw");
        assert_eq!(times.item(2).unwrap().text_content().unwrap(), "raw");
    }
}
