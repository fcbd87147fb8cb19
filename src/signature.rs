use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

fn mac_over(gateway_order_id: &str, gateway_payment_id: &str, secret: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC-SHA256 accepts keys of any length");
    mac.update(gateway_order_id.as_bytes());
    mac.update(b"|");
    mac.update(gateway_payment_id.as_bytes());
    mac
}

/// Hex-encoded HMAC-SHA256 over `order_id|payment_id`, the checkout
/// signature format the gateway returns to the browser.
pub fn sign(gateway_order_id: &str, gateway_payment_id: &str, secret: &str) -> String {
    hex::encode(mac_over(gateway_order_id, gateway_payment_id, secret).finalize().into_bytes())
}

/// Checks that a claimed callback signature was produced by the gateway.
/// Comparison is constant-time; malformed hex fails verification.
pub fn verify(
    gateway_order_id: &str,
    gateway_payment_id: &str,
    provided_signature: &str,
    secret: &str,
) -> bool {
    let Ok(provided) = hex::decode(provided_signature) else {
        return false;
    };
    mac_over(gateway_order_id, gateway_payment_id, secret)
        .verify_slice(&provided)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::{sign, verify};

    #[test]
    fn accepts_own_signature() {
        let sig = sign("order_abc", "pay_xyz", "secret");
        assert!(verify("order_abc", "pay_xyz", &sig, "secret"));
    }

    #[test]
    fn signing_is_deterministic() {
        assert_eq!(sign("order_abc", "pay_xyz", "secret"), sign("order_abc", "pay_xyz", "secret"));
    }

    #[test]
    fn any_changed_input_fails() {
        let sig = sign("order_abc", "pay_xyz", "secret");
        assert!(!verify("order_abd", "pay_xyz", &sig, "secret"));
        assert!(!verify("order_abc", "pay_xyy", &sig, "secret"));
        assert!(!verify("order_abc", "pay_xyz", &sig, "secrex"));
    }

    #[test]
    fn tampered_byte_fails() {
        let mut sig = sign("order_abc", "pay_xyz", "secret").into_bytes();
        sig[0] = if sig[0] == b'0' { b'1' } else { b'0' };
        let tampered = String::from_utf8(sig).unwrap();
        assert!(!verify("order_abc", "pay_xyz", &tampered, "secret"));
    }

    #[test]
    fn malformed_hex_fails() {
        assert!(!verify("order_abc", "pay_xyz", "not-hex!", "secret"));
        assert!(!verify("order_abc", "pay_xyz", "", "secret"));
    }
}
