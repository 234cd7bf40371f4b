use std::ffi::OsString;

/// Config sections that can be set from `POSTFEED_<SECTION>__<KEY>`.
const SECTIONS: &[&str] = &["API", "SCROLL", "DISPLAY"];

/// Warn about env vars that look like config keys but use a single
/// underscore, which figment silently ignores.
pub fn warn_misnamed_env() {
    for warning in collect_misnamed_env(std::env::vars_os()) {
        tracing::warn!("{warning}");
    }
}

fn collect_misnamed_env<I>(env: I) -> Vec<String>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    let mut warnings = Vec::new();

    // Keys that are not valid UTF-8 can never name a config field.
    for key in env.into_iter().filter_map(|(key, _)| key.into_string().ok()) {
        for section in SECTIONS {
            let single = format!("POSTFEED_{section}_");
            if key.starts_with(&single) && !key.starts_with(&format!("{single}_")) {
                let field = &key[single.len()..];
                warnings.push(format!(
                    "{key} is ignored. Use double underscores (example: POSTFEED_{section}__{field})."
                ));
            }
        }
    }

    warnings.sort();
    warnings
}
