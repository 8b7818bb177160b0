use rand::RngExt;

use crate::config::GatewayContext;

pub const SHORT_CODE_LENGTH: usize = 6;

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const DEFAULT_API_ID: &str = "local";
const DEFAULT_STAGE: &str = "prod";

// random alphanumeric code; no uniqueness check against the store
pub fn generate_short_code(length: usize) -> String {
    let mut rng = rand::rng();
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

// display url: <base>/<api-id>/<stage>/_user_request_/<code>
pub fn build_short_url(base_url: &str, gateway: &GatewayContext, short_code: &str) -> String {
    let api_id = gateway.api_id.as_deref().unwrap_or(DEFAULT_API_ID);
    let stage = gateway.stage.as_deref().unwrap_or(DEFAULT_STAGE);
    format!(
        "{}/{}/{}/_user_request_/{}",
        base_url.trim_end_matches('/'),
        api_id,
        stage,
        short_code
    )
}
