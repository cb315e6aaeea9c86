use crate::file_utils::strip_extension;

/// Conjunction markers, in the order they are tried.
const ARTIST_MARKERS: [&str; 2] = [" y ", " & "];

/// Title-case like Python's `str.title()`: a cased letter that follows an
/// uncased character starts a word and is upper-cased, every other cased
/// letter is lower-cased. Uncased letters (CJK, digits) end the word.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_lowercase() || c.is_uppercase() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Display name used by the file listing report.
///
/// A name starting with a digit loses every digit it contains, not just
/// the leading run; then the extension is removed.
pub fn normalize_loose(raw_file_name: &str) -> String {
    let starts_with_digit = raw_file_name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit());

    if starts_with_digit {
        let without_digits: String = raw_file_name.chars().filter(|c| !c.is_ascii_digit()).collect();
        strip_extension(&without_digits).to_string()
    } else {
        strip_extension(raw_file_name).to_string()
    }
}

/// Track name used by the subfolder/audio report.
///
/// Drops the extension, then a leading track number with the separators that
/// follow it, keeps only the text before the first remaining underscore and
/// title-cases the result: `"01_Solamente_Tu_Remix.mp3"` becomes `"Solamente"`.
pub fn normalize_strict(raw_file_name: &str) -> String {
    let stem = strip_extension(raw_file_name);

    let mut name = stem;
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name = name
            .trim_start_matches(|c: char| c.is_ascii_digit())
            .trim_start_matches(|c: char| c == '_' || c == '-' || c.is_whitespace());
    }

    let name = name.split('_').next().unwrap_or_default();
    title_case(name)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistPair {
    pub primary: String,
    pub secondary: Option<String>,
}

/// Split a folder named after one or two artists.
///
/// Splits once, at the first " y " (any case), or failing that at the first
/// " & ". Both halves are trimmed and title-cased. Without a marker the
/// trimmed folder name is kept verbatim as the primary artist.
pub fn split_artists(folder_name: &str) -> ArtistPair {
    let trimmed = folder_name.trim();
    // ASCII lower-casing keeps byte offsets aligned with `trimmed`
    let lowered = trimmed.to_ascii_lowercase();

    for marker in ARTIST_MARKERS {
        if let Some(at) = lowered.find(marker) {
            let before = trimmed[..at].trim();
            let after = trimmed[at + marker.len()..].trim();
            return ArtistPair {
                primary: title_case(before),
                secondary: (!after.is_empty()).then(|| title_case(after)),
            };
        }
    }

    ArtistPair {
        primary: trimmed.to_string(),
        secondary: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("juan GABRIEL"), "Juan Gabriel");
        assert_eq!(title_case("rock'n'roll"), "Rock'N'Roll");
        assert_eq!(title_case("los-tigres del norte"), "Los-Tigres Del Norte");
        assert_eq!(title_case("3am"), "3Am");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_uncased_letters_split_words() {
        assert_eq!(title_case("a中b"), "A中B");
        assert_eq!(title_case("josé ÁLVAREZ"), "José Álvarez");
    }

    #[test]
    fn test_loose_strips_all_digits_when_leading() {
        assert_eq!(normalize_loose("3intro.mp3"), "intro");
        assert_eq!(normalize_loose("01 Track 2 Live.wav"), " Track  Live");
        assert_eq!(normalize_loose("track.mp3"), "track");
        assert_eq!(normalize_loose("Track 2.mp3"), "Track 2");
    }

    #[test]
    fn test_loose_without_extension() {
        assert_eq!(normalize_loose("README"), "README");
        assert_eq!(normalize_loose("12"), "");
        assert_eq!(normalize_loose(""), "");
    }

    #[test]
    fn test_loose_digit_stripping_can_expose_extension() {
        // Every digit goes, including the one in "mp3", before the extension is removed
        assert_eq!(normalize_loose("1.5.mp3"), "..mp");
    }

    #[test]
    fn test_strict() {
        assert_eq!(normalize_strict("01_Solamente_Tu_Remix.mp3"), "Solamente");
        assert_eq!(normalize_strict("02 - amor eterno.mp3"), "Amor Eterno");
        assert_eq!(normalize_strict("03-_ la bamba_live.MP3"), "La Bamba");
        assert_eq!(normalize_strict("cielito lindo.mp3"), "Cielito Lindo");
        assert_eq!(normalize_strict("Track 2.mp3"), "Track 2");
    }

    #[test]
    fn test_strict_edge_cases() {
        assert_eq!(normalize_strict("01.mp3"), "");
        assert_eq!(normalize_strict("_hidden_track.mp3"), "");
        assert_eq!(normalize_strict("noextension"), "Noextension");
    }

    #[test]
    fn test_split_on_y() {
        let pair = split_artists("Juan Gabriel Y Rocio Durcal");
        assert_eq!(pair.primary, "Juan Gabriel");
        assert_eq!(pair.secondary.as_deref(), Some("Rocio Durcal"));

        let pair = split_artists("  jose jose y ana gabriel ");
        assert_eq!(pair.primary, "Jose Jose");
        assert_eq!(pair.secondary.as_deref(), Some("Ana Gabriel"));
    }

    #[test]
    fn test_no_marker_keeps_name_verbatim() {
        let pair = split_artists("  juan gabriel ");
        assert_eq!(pair.primary, "juan gabriel");
        assert_eq!(pair.secondary, None);

        // "y" inside a word is not a marker
        let pair = split_artists("Yuridia");
        assert_eq!(pair.primary, "Yuridia");
        assert_eq!(pair.secondary, None);
    }

    #[test]
    fn test_split_only_once() {
        let pair = split_artists("A & B & C");
        assert_eq!(pair.primary, "A");
        assert_eq!(pair.secondary.as_deref(), Some("B & C"));

        let pair = split_artists("a y b y c");
        assert_eq!(pair.primary, "A");
        assert_eq!(pair.secondary.as_deref(), Some("B Y C"));
    }

    #[test]
    fn test_y_marker_wins_over_ampersand() {
        let pair = split_artists("Sonora & Banda y Mariachi");
        assert_eq!(pair.primary, "Sonora & Banda");
        assert_eq!(pair.secondary.as_deref(), Some("Mariachi"));
    }
}
