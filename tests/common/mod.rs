#![allow(dead_code)]

pub mod test_app;

pub use test_app::TestApp;

use reqwest::Response;
use rolodex::models::flash::Flash;
use rolodex::services::cookies;

/// Generate a unique username so parallel tests never collide.
pub fn unique_username(prefix: &str) -> String {
    format!("{}_{}", prefix, nanoid::nanoid!(8))
}

/// Decode the flash cookie set by a response, if any.
pub fn flash_of(response: &Response) -> Option<Flash> {
    response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .find_map(|cookie| {
            let (name, rest) = cookie.split_once('=')?;
            if name != cookies::FLASH_COOKIE {
                return None;
            }
            let raw = rest.split(';').next().unwrap_or("");
            cookies::decode_flash(raw)
        })
}

/// Assert that a response carries a flash with the given message.
pub fn assert_flash(response: &Response, expected: &str) {
    let flash = flash_of(response).expect("response should carry a flash cookie");
    assert_eq!(flash.message, expected);
}
