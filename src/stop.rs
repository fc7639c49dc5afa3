//! Stop-token enforcement for replies

/// Cut `text` just before the earliest occurrence of any stop
/// string.
///
/// Matching is literal substring search. When two stop strings start
/// at the same index the one listed first wins. Empty stop strings
/// are ignored; with no match the text comes back unchanged.
pub fn enforce_stop_tokens<'a, S>(text: &'a str, stop: &[S]) -> &'a str
where
  S: AsRef<str>
{   let mut cut: Option<usize> = None;
    for token in stop.iter().map(AsRef::as_ref)
    {   if token.is_empty()
        {   continue;
        }
        if let Some(idx) = text.find(token)
        {   // strict less-than keeps the earlier entry on a tie
            if cut.map_or(true, |c| idx < c)
            {   cut = Some(idx);
            }
        }
    }
    match cut
    {   Some(idx) => &text[..idx]
      , None => text
    }
}

#[cfg(test)]
mod tests
{   use super::*;

    #[test]
    fn earliest_match_wins()
    {   assert_eq!(
          enforce_stop_tokens("hello world foo", &["world", "foo"]),
          "hello "
        );
        assert_eq!(
          enforce_stop_tokens("hello world foo", &["foo", "world"]),
          "hello "
        );
    }

    #[test]
    fn no_match_is_unchanged()
    {   assert_eq!(enforce_stop_tokens("hello world", &["zzz"]), "hello world");
    }

    #[test]
    fn empty_stop_list_is_unchanged()
    {   let stop: [&str; 0] = [];
        assert_eq!(enforce_stop_tokens("hello", &stop), "hello");
        assert_eq!(enforce_stop_tokens("hello", &[""]), "hello");
    }

    #[test]
    fn tie_prefers_earlier_entry()
    {   // both start at index 6
        assert_eq!(
          enforce_stop_tokens("hello world", &["wor", "world"]),
          "hello "
        );
    }

    #[test]
    fn match_at_start_yields_empty()
    {   assert_eq!(enforce_stop_tokens("Human: hi", &["Human:"]), "");
    }

    #[test]
    fn stop_strings_are_literal()
    {   assert_eq!(enforce_stop_tokens("a.b|c", &["|"]), "a.b");
        assert_eq!(enforce_stop_tokens("abc", &["."]), "abc");
    }

    #[test]
    fn accepts_owned_strings()
    {   let stop = vec!["\n".to_string()];
        assert_eq!(enforce_stop_tokens("line one\nline two", &stop), "line one");
    }
}
