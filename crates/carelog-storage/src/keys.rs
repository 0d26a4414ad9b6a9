//! Storage key generation, centralized so all backends stay consistent.

/// Generate the storage key for an uploaded file.
pub fn generate_key(filename: &str) -> String {
    format!("records/{}", filename)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key() {
        assert_eq!(
            generate_key("1f2e3d4c.pdf"),
            "records/1f2e3d4c.pdf"
        );
    }
}
