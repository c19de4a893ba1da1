//! Minimal PEM armor handling.

use base64::Engine;

/// Extracts DER data from a PEM string.
///
/// Returns `None` when the requested label is absent or the payload is not
/// valid base64.
#[must_use]
pub fn pem_to_der(pem: &str, label: &str) -> Option<Vec<u8>> {
    let begin = format!("-----BEGIN {label}-----");
    let end = format!("-----END {label}-----");

    let start = pem.find(&begin)? + begin.len();
    let end_pos = pem.find(&end)?;

    let b64_data: String = pem[start..end_pos]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    base64::engine::general_purpose::STANDARD.decode(&b64_data).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_der_from_pem() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAEC\n-----END CERTIFICATE-----\n";
        assert_eq!(pem_to_der(pem, "CERTIFICATE"), Some(vec![0, 1, 2]));
    }

    #[test]
    fn wrong_label_yields_none() {
        let pem = "-----BEGIN CERTIFICATE-----\nAAEC\n-----END CERTIFICATE-----\n";
        assert_eq!(pem_to_der(pem, "PRIVATE KEY"), None);
    }

    #[test]
    fn invalid_base64_yields_none() {
        let pem = "-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----\n";
        assert_eq!(pem_to_der(pem, "CERTIFICATE"), None);
    }
}
