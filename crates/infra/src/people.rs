use std::collections::BTreeSet;

use fairsplit_core::Person;

/// Trim, drop blanks, dedupe and sort a list of names.
pub fn normalize_people<I, S>(names: I) -> Vec<Person>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter_map(|name| Person::new(name).ok())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
