use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use ui::i18n::{self, Lang, CHROME_KEYS};
use ui::widgets::bubble_grid::Category;

/// Name of the canonical FTL file per locale.
const FTL_FILENAME: &str = "pulz-ui.ftl";

/// Root (relative to crate) for i18n assets.
const I18N_DIR: &str = "i18n";

/// Call shapes whose first string literal argument is a message id.
const LOOKUPS: [&str; 2] = ["t!(", "i18n::text("];

/// Extract message IDs from a Fluent file. Any line of the form
/// `<identifier> =` counts; comments, terms and blank lines are ignored.
fn parse_ftl_keys(content: &str) -> BTreeSet<String> {
    let mut keys = BTreeSet::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('-') {
            continue;
        }
        if let Some((id, _)) = line.split_once('=') {
            let id = id.trim();
            if !id.is_empty() && id.chars().all(valid_key_char) {
                keys.insert(id.to_string());
            }
        }
    }
    keys
}

fn valid_key_char(c: char) -> bool {
    matches!(c, 'a'..='z' | '0'..='9' | '-')
}

/// First string literal inside the argument list starting at `args`,
/// stopping at the closing parenthesis.
fn first_literal(args: &str) -> Option<&str> {
    let close = args.find(')')?;
    let list = &args[..close];
    let open = list.find('"')?;
    let rest = &list[open + 1..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

/// Message ids passed as literals to `t!(lang, "...")` or
/// `i18n::text(lang, "...")` anywhere under `src/`. Ids built at runtime
/// are not seen here.
fn extract_translation_keys_from_source(src_root: &Path) -> BTreeSet<String> {
    let mut found = BTreeSet::new();
    let mut stack = vec![src_root.to_path_buf()];

    while let Some(path) = stack.pop() {
        if path.is_dir() {
            if let Ok(read_dir) = fs::read_dir(&path) {
                stack.extend(read_dir.flatten().map(|entry| entry.path()));
            }
            continue;
        }
        if path.extension().and_then(|s| s.to_str()) != Some("rs") {
            continue;
        }
        let Ok(content) = fs::read_to_string(&path) else {
            continue;
        };

        for needle in LOOKUPS {
            let mut rest = content.as_str();
            while let Some(pos) = rest.find(needle) {
                // `assert!(`, `format!(` and friends also end in `t!(`.
                let standalone = !rest[..pos]
                    .chars()
                    .next_back()
                    .is_some_and(|c| c.is_alphanumeric() || c == '_');
                rest = &rest[pos + needle.len()..];
                if !standalone {
                    continue;
                }
                if let Some(key) = first_literal(rest) {
                    if !key.is_empty() && key.chars().all(valid_key_char) {
                        found.insert(key.to_string());
                    }
                }
            }
        }
    }

    found
}

fn read_locale(i18n_root: &Path, locale: &str) -> BTreeSet<String> {
    let path = i18n_root.join(locale).join(FTL_FILENAME);
    let content = fs::read_to_string(&path)
        .unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"));
    parse_ftl_keys(&content)
}

#[test]
fn referenced_keys_exist_in_every_locale() {
    let crate_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let i18n_root = crate_root.join(I18N_DIR);

    let referenced = extract_translation_keys_from_source(&crate_root.join("src"));
    assert!(
        referenced.len() > 20,
        "suspiciously few t! call sites found ({}); did the macro shape change?",
        referenced.len()
    );

    for lang in Lang::ALL {
        let keys = read_locale(&i18n_root, lang.fluent_id());
        let missing: Vec<_> = referenced.iter().filter(|k| !keys.contains(*k)).collect();
        assert!(
            missing.is_empty(),
            "{} lacks {} referenced key(s):\n{}",
            lang.fluent_id(),
            missing.len(),
            missing
                .iter()
                .map(|k| k.as_str())
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
}

#[test]
fn runtime_keys_resolve_in_every_language() {
    let table = i18n::translations();
    for lang in Lang::ALL {
        for key in CHROME_KEYS {
            assert!(table.has(lang, key), "{lang} lacks chrome key {key}");
        }
        for category in Category::ALL {
            for key in [category.title_key(), category.description_key()] {
                assert!(table.has(lang, &key), "{lang} lacks {key}");
            }
        }
    }
}

#[test]
fn german_chrome_differs_from_english() {
    for key in ["page-title", "footer-rights", "current-language"] {
        assert_ne!(i18n::text(Lang::En, key), i18n::text(Lang::De, key), "{key}");
    }
}
