use rand::Rng;

const SUFFIX_LEN: usize = 6;
const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Human-readable collision-resistant id, e.g. `PAT_K4Q9TZ`. Random
/// suffixes instead of store-size counters so concurrent writers cannot
/// mint the same id.
pub fn make_id(prefix: &str) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();
    format!("{}_{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_carry_prefix_and_fixed_suffix() {
        let id = make_id("DR");
        assert!(id.starts_with("DR_"));
        assert_eq!(id.len(), "DR_".len() + SUFFIX_LEN);
        assert!(id["DR_".len()..]
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
    }

    #[test]
    fn ids_are_not_sequential() {
        let a = make_id("CONS");
        let b = make_id("CONS");
        assert_ne!(a, b);
    }
}
