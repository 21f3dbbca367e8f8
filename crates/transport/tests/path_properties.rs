use proptest::prelude::*;
use transport::{PathSpec, join_path, parent_dir, relative_to};

fn segment() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_. -]{1,12}".prop_filter("no dot segments", |s| s != "." && s != "..")
}

fn absolute_path() -> impl Strategy<Value = String> {
    prop::collection::vec(segment(), 1..5).prop_map(|parts| format!("/{}", parts.join("/")))
}

proptest! {
    #[test]
    fn remote_display_reparses_to_same_spec(host in "[a-z][a-z0-9.@-]{0,15}", path in absolute_path()) {
        let spec = PathSpec::remote(host.clone(), path.clone());
        let reparsed = PathSpec::parse(&spec.to_string());
        prop_assert_eq!(reparsed.host(), Some(host.as_str()));
        prop_assert_eq!(reparsed.path(), path.as_str());
    }

    #[test]
    fn absolute_local_paths_never_become_remote(path in absolute_path(), suffix in "[a-z:]{0,6}") {
        let expression = format!("{path}{suffix}");
        let spec = PathSpec::parse(&expression);
        prop_assert!(!spec.is_remote());
        prop_assert_eq!(spec.path(), expression.as_str());
    }

    #[test]
    fn joined_names_are_relative_to_their_base(base in absolute_path(), names in prop::collection::vec(segment(), 1..4)) {
        let relative = names.join("/");
        let joined = join_path(&base, &relative);
        prop_assert_eq!(relative_to(&joined, &base), Some(relative.as_str()));

        let with_slash = format!("{base}/");
        prop_assert_eq!(relative_to(&joined, &with_slash), Some(relative.as_str()));
    }

    #[test]
    fn parent_of_joined_file_is_its_directory(base in absolute_path(), name in segment()) {
        let joined = join_path(&base, &name);
        prop_assert_eq!(parent_dir(&joined), base.as_str());
    }
}
