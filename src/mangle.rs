// src/mangle.rs
// =============================================================================
// This module turns a URL path into a plausible-but-invalid sibling path.
//
// The crawler uses it to synthesize requests that should come back as 404s:
// one random lowercase letter is inserted somewhere inside the final path
// segment, so "/blog/post/" might become "/blog/pqost/".
//
// Each call makes exactly two draws from the random source it is handed:
//   1. an insertion index in [0, len(last segment)]
//   2. a letter from a-z
// so a seeded generator gives reproducible output.
//
// Rust concepts:
// - Generics with trait bounds: `R: Rng + ?Sized` accepts any generator
// - &str slicing and rsplit_once
// =============================================================================

use rand::Rng;

const ALPHABET: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";

// Returns true when a path is long enough to be worth mangling.
//
// Paths whose slash-stripped form is 0 or 1 characters long ("/", "/a")
// are never mangled by the crawler.
pub fn is_mangleable(path: &str) -> bool {
    path.trim_matches('/').chars().count() > 1
}

// Mangles `path` by inserting one random lowercase letter into its last
// segment.
//
// Example (with some particular generator state):
//   "/afas/a/" -> "/afas/sa/"
//   "/afas"    -> "/asfas"
pub fn mangle_path<R: Rng + ?Sized>(path: &str, rng: &mut R) -> String {
    let (_, last) = split_last_segment(path);
    let index = rng.gen_range(0..=last.chars().count());
    let letter = ALPHABET[rng.gen_range(0..ALPHABET.len())] as char;
    insert_letter(path, index, letter)
}

// Deterministic half of mangle_path: inserts `letter` before the `index`-th
// character of the last segment and rebuilds the path.
//
// `index` is clamped to the segment length.
pub fn insert_letter(path: &str, index: usize, letter: char) -> String {
    let (lead, last) = split_last_segment(path);

    // Translate the character index into a byte offset so multi-byte
    // characters never get split
    let offset = last
        .char_indices()
        .nth(index)
        .map(|(i, _)| i)
        .unwrap_or(last.len());

    let mut new_last = String::with_capacity(last.len() + 1);
    new_last.push_str(&last[..offset]);
    new_last.push(letter);
    new_last.push_str(&last[offset..]);

    let mut new_path = format!("{}/{}", lead, new_last);
    if path.ends_with('/') && !new_path.ends_with('/') {
        new_path.push('/');
    }
    new_path
}

// Splits "/a/b/c/" into ("/a/b", "c").
//
// A path without any '/' is treated as a single segment with an empty lead.
fn split_last_segment(path: &str) -> (&str, &str) {
    let trimmed = path.strip_suffix('/').unwrap_or(path);
    trimmed.rsplit_once('/').unwrap_or(("", trimmed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_insert_into_single_segment() {
        assert_eq!(insert_letter("/a", 0, 's'), "/sa");
        assert_eq!(insert_letter("/afas", 1, 's'), "/asfas");
    }

    #[test]
    fn test_insert_only_touches_last_segment() {
        assert_eq!(insert_letter("/afas/ab", 0, 's'), "/afas/sab");
        assert_eq!(insert_letter("/afas/a/ab", 0, 's'), "/afas/a/sab");
        assert_eq!(insert_letter("/afas/ab", 2, 'z'), "/afas/abz");
    }

    #[test]
    fn test_trailing_slash_is_kept() {
        assert_eq!(insert_letter("/afas/a/", 0, 's'), "/afas/sa/");
        assert_eq!(insert_letter("/docs/", 4, 'x'), "/docsx/");
    }

    #[test]
    fn test_index_is_clamped() {
        assert_eq!(insert_letter("/ab", 99, 'q'), "/abq");
    }

    #[test]
    fn test_splice_for_every_index() {
        let segment = "guide";
        for i in 0..=segment.len() {
            let mangled = insert_letter(&format!("/docs/{}", segment), i, 'k');
            let expected = format!("/docs/{}k{}", &segment[..i], &segment[i..]);
            assert_eq!(mangled, expected);
        }
    }

    #[test]
    fn test_same_seed_same_output() {
        let paths = ["/a", "/afas", "/afas/a/", "/afas/ab", "/afas/a/ab"];

        let mut first = StdRng::seed_from_u64(1);
        let mut second = StdRng::seed_from_u64(1);

        for path in paths {
            assert_eq!(mangle_path(path, &mut first), mangle_path(path, &mut second));
        }
    }

    #[test]
    fn test_mangled_path_shape() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let mangled = mangle_path("/blog/post/", &mut rng);

            assert!(mangled.starts_with("/blog/"));
            assert!(mangled.ends_with('/'));

            let last = mangled.trim_end_matches('/').rsplit('/').next().unwrap();
            assert_eq!(last.len(), "post".len() + 1);

            // Removing exactly one lowercase letter gives back the original
            let restored = (0..last.len()).any(|i| {
                last.as_bytes()[i].is_ascii_lowercase()
                    && format!("{}{}", &last[..i], &last[i + 1..]) == "post"
            });
            assert!(restored, "unexpected mangling: {}", mangled);
        }
    }

    #[test]
    fn test_is_mangleable() {
        assert!(!is_mangleable("/"));
        assert!(!is_mangleable(""));
        assert!(!is_mangleable("/a"));
        assert!(!is_mangleable("/a/"));
        assert!(is_mangleable("/ab"));
        assert!(is_mangleable("/a/b"));
    }
}
