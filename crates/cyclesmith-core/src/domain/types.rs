//! Text-level classification of C++ type spellings.
//!
//! Nothing in here parses C++. The container check is a pattern match on the
//! outermost template name and will happily misjudge exotic spellings; it only
//! has to be right for the branch types that show up in ntuples.

use std::sync::LazyLock;

use regex::Regex;

static CONTAINER_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(vector|list|set|map)\s*<.*?>").expect("container pattern is valid")
});

static SPACE_AROUND_BRACKET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*([<>])\s*").expect("bracket pattern is valid"));

/// ROOT scalar typedefs and their plain C++ spelling.
const ROOT_TYPEDEFS: &[(&str, &str)] = &[
    ("Bool_t", "bool"),
    ("Char_t", "char"),
    ("UChar_t", "unsigned char"),
    ("Short_t", "short"),
    ("UShort_t", "unsigned short"),
    ("Int_t", "int"),
    ("UInt_t", "unsigned int"),
    ("Long64_t", "long long"),
    ("ULong64_t", "unsigned long long"),
    ("Float_t", "float"),
    ("Double_t", "double"),
];

/// Returns `true` if `typename` looks like an STL container instantiation
/// (`vector`, `list`, `set` or `map` followed by `<...>`).
///
/// Containers used for output have to be cleared before every event, and
/// every non-trivial instantiation needs its own dictionary entry.
pub fn is_container_like(typename: &str) -> bool {
    CONTAINER_LIKE.is_match(typename)
}

/// Canonical spelling of a type name for comparisons.
///
/// Spaces next to angle brackets are dropped, adjacent closing brackets are
/// separated by exactly one space (`> >`, the pre-C++11 spelling that
/// rootcint still expects) and the result is trimmed.
pub fn normalize_type(typename: &str) -> String {
    let mut out = SPACE_AROUND_BRACKET.replace_all(typename, "$1").into_owned();
    while out.contains(">>") {
        out = out.replace(">>", "> >");
    }
    out.trim().to_string()
}

/// Storage type used for output variables: ROOT typedefs are spelled out and
/// the result is normalized.
pub fn std_type_name(typename: &str) -> String {
    let mut out = String::with_capacity(typename.len());
    let mut word = String::new();

    let flush = |word: &mut String, out: &mut String| {
        let mapped = ROOT_TYPEDEFS
            .iter()
            .find(|(root, _)| *root == word.as_str())
            .map_or(word.as_str(), |(_, plain)| *plain);
        out.push_str(mapped);
        word.clear();
    };

    for c in typename.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word.push(c);
        } else {
            flush(&mut word, &mut out);
            out.push(c);
        }
    }
    flush(&mut word, &mut out);

    normalize_type(&out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn containers_are_detected() {
        assert!(is_container_like("vector<int>"));
        assert!(is_container_like("std::map<int,float>"));
        assert!(is_container_like("list <Foo>"));
        assert!(is_container_like("std::vector<std::vector<float> >"));
        assert!(is_container_like("set<unsigned int>"));
    }

    #[test]
    fn scalars_and_broken_spellings_are_not_containers() {
        assert!(!is_container_like("int"));
        assert!(!is_container_like("MyClass"));
        assert!(!is_container_like("Foo<Bar"));
        assert!(!is_container_like("vector"));
    }

    #[test]
    fn normalize_strips_spaces_around_brackets() {
        assert_eq!(normalize_type("vector < int >"), "vector<int>");
        assert_eq!(normalize_type("  std::map< int, float > "), "std::map<int, float>");
    }

    #[test]
    fn normalize_separates_closing_brackets() {
        assert_eq!(
            normalize_type("vector<vector<float>>"),
            "vector<vector<float> >"
        );
        assert_eq!(
            normalize_type("vector<vector<vector<int>>>"),
            "vector<vector<vector<int> > >"
        );
        assert_eq!(
            normalize_type("vector< vector< float >  >"),
            "vector<vector<float> >"
        );
    }

    #[test]
    fn normalize_is_idempotent() {
        for input in [
            "vector < vector<int>>",
            "map<int, vector<float> >",
            " unsigned int ",
            "std::vector<std::vector<std::vector<double>>>",
        ] {
            let once = normalize_type(input);
            assert_eq!(normalize_type(&once), once, "input: {input}");
        }
    }

    #[test]
    fn std_type_name_spells_out_root_typedefs() {
        assert_eq!(std_type_name("Int_t"), "int");
        assert_eq!(std_type_name("vector<Float_t>"), "vector<float>");
        assert_eq!(
            std_type_name("std::vector<std::vector<UInt_t>>"),
            "std::vector<std::vector<unsigned int> >"
        );
    }

    #[test]
    fn std_type_name_leaves_other_identifiers_alone() {
        assert_eq!(std_type_name("Int_tX"), "Int_tX");
        assert_eq!(std_type_name("TLorentzVector"), "TLorentzVector");
    }
}
