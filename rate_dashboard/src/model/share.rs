//! Share text and social share links for the latest quote.
use rate_common::Quote;
use rate_common::defaults::{BASE_ASSET, PRICE_ORIGIN, QUOTE_ASSET};

/// Message describing `last`, empty when there is no quote yet.
pub fn share_text(last: Option<&Quote>) -> String {
    match last {
        Some(quote) => format!(
            "1 {} = {:.2} {}\nFecha: {}\nCotizacion en tiempo real desde {}",
            BASE_ASSET, quote.rate, QUOTE_ASSET, quote.datetime, PRICE_ORIGIN
        ),
        None => String::new(),
    }
}

/// WhatsApp link carrying the text followed by the page URL.
pub fn whatsapp_link(text: &str, url: &str) -> String {
    let message = format!("{}\n\nVer mas: {}", text, url);
    format!("https://wa.me/?text={}", urlencoding::encode(&message))
}

/// Telegram share link for `url` with `text` as caption.
pub fn telegram_link(text: &str, url: &str) -> String {
    format!(
        "https://t.me/share/url?url={}&text={}",
        urlencoding::encode(url),
        urlencoding::encode(text)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rounds_rate_to_two_decimals() {
        let quote = Quote::new("2026-10-19 10:30:00", 6.9649);
        assert_eq!(
            share_text(Some(&quote)),
            "1 USDT = 6.96 BOB\nFecha: 2026-10-19 10:30:00\nCotizacion en tiempo real desde Binance P2P"
        );
        assert_eq!(share_text(None), "");
    }

    #[test]
    fn whatsapp_link_encodes_message_and_url() {
        assert_eq!(
            whatsapp_link("1 USDT", "https://x.io/"),
            "https://wa.me/?text=1%20USDT%0A%0AVer%20mas%3A%20https%3A%2F%2Fx.io%2F"
        );
    }

    #[test]
    fn telegram_link_encodes_both_parameters() {
        assert_eq!(
            telegram_link("a&b", "https://x.io/?p=1"),
            "https://t.me/share/url?url=https%3A%2F%2Fx.io%2F%3Fp%3D1&text=a%26b"
        );
    }
}
