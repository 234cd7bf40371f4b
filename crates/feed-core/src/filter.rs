//! Title filter over the loaded feed.
//!
//! The filtered view is always derived, never stored: it is a pure function
//! of the loaded posts and the current term.

use crate::post::Post;

/// Return the posts whose title contains `term`, ignoring case.
///
/// The result is a subsequence of `posts` in their original order. A term that
/// is empty or only whitespace selects every post. A non-blank term is matched
/// as typed, surrounding whitespace included.
#[must_use]
pub fn filter_posts<'a>(posts: &'a [Post], term: &str) -> Vec<&'a Post> {
    if is_blank(term) {
        return posts.iter().collect();
    }

    let needle = term.to_lowercase();
    posts
        .iter()
        .filter(|post| title_contains(&post.title, &needle))
        .collect()
}

/// Whether `term` selects the whole feed.
#[must_use]
pub fn is_blank(term: &str) -> bool {
    term.trim().is_empty()
}

/// Case-insensitive containment; `needle` must already be lowercased.
fn title_contains(title: &str, needle: &str) -> bool {
    title.to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    fn posts() -> Vec<Post> {
        vec![
            Post::new(1, "qui est esse", ""),
            Post::new(2, "Eum ET est occaecati", ""),
            Post::new(3, "nesciunt quas odio", ""),
            Post::new(4, "eveniet quod temporibus", ""),
        ]
    }

    fn ids(view: &[&Post]) -> Vec<u64> {
        view.iter().map(|post| post.id).collect()
    }

    #[rstest]
    #[case("et", vec![2, 4])]
    #[case("ET", vec![2, 4])]
    #[case("eT", vec![2, 4])]
    #[case("quas", vec![3])]
    #[case("est", vec![1, 2])]
    #[case("zzz", vec![])]
    fn matches_ignoring_case_in_original_order(#[case] term: &str, #[case] expected: Vec<u64>) {
        let posts = posts();
        assert_eq!(ids(&filter_posts(&posts, term)), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\t\n")]
    fn blank_term_yields_full_feed(#[case] term: &str) {
        let posts = posts();
        assert_eq!(ids(&filter_posts(&posts, term)), vec![1, 2, 3, 4]);
    }

    #[test]
    fn non_blank_term_keeps_surrounding_whitespace() {
        let posts = posts();
        // " et " only occurs between words, never at the end of "eveniet".
        assert_eq!(ids(&filter_posts(&posts, " et ")), vec![2]);
    }

    #[test]
    fn result_is_a_subsequence() {
        let posts = posts();
        for term in ["e", "o", "est", "q"] {
            let view = filter_posts(&posts, term);
            let mut cursor = posts.iter();
            for item in &view {
                assert!(
                    cursor.any(|post| post.id == item.id),
                    "view for {term:?} is not an ordered subsequence"
                );
                assert!(item.title.to_lowercase().contains(&term.to_lowercase()));
            }
        }
    }

    #[test]
    fn empty_feed_yields_empty_view() {
        assert!(filter_posts(&[], "et").is_empty());
        assert!(filter_posts(&[], "").is_empty());
    }
}
