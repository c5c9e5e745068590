//! End-to-end: query strings filtering in-memory records with relations.

use standout_searchable::{Filter, Params, Record, SearchConfig, Searchable, Value};

#[derive(Debug)]
struct Tag {
    name: String,
}

#[derive(Debug)]
struct Author {
    name: String,
    tags: Vec<Tag>,
}

#[derive(Debug)]
struct Post {
    title: String,
    score: i64,
    published: bool,
    editor: Option<String>,
    authors: Vec<Author>,
}

impl Record for Tag {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::from(&self.name),
            _ => Value::None,
        }
    }
}

impl Record for Author {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => Value::from(&self.name),
            _ => Value::None,
        }
    }

    fn related(&self, relation: &str) -> Vec<&dyn Record> {
        match relation {
            "tags" => self.tags.iter().map(|t| t as &dyn Record).collect(),
            _ => Vec::new(),
        }
    }
}

impl Record for Post {
    fn field_value(&self, field: &str) -> Value<'_> {
        match field {
            "title" => Value::from(&self.title),
            "score" => Value::from(self.score),
            "published" => Value::from(self.published),
            "editor" => Value::from(self.editor.as_deref()),
            _ => Value::None,
        }
    }

    fn related(&self, relation: &str) -> Vec<&dyn Record> {
        match relation {
            "authors" => self.authors.iter().map(|a| a as &dyn Record).collect(),
            _ => Vec::new(),
        }
    }
}

fn author(name: &str, tags: &[&str]) -> Author {
    Author {
        name: name.to_string(),
        tags: tags
            .iter()
            .map(|t| Tag {
                name: t.to_string(),
            })
            .collect(),
    }
}

fn posts() -> Vec<Post> {
    vec![
        Post {
            title: "Rust ownership".into(),
            score: 10,
            published: true,
            editor: Some("ed".into()),
            authors: vec![author("alice", &["rust"]), author("bob", &[])],
        },
        Post {
            title: "Async in practice".into(),
            score: 3,
            published: true,
            editor: None,
            authors: vec![author("carol", &["async", "rust"])],
        },
        Post {
            title: "Draft notes".into(),
            score: 7,
            published: false,
            editor: None,
            authors: vec![],
        },
    ]
}

fn titles(query: &str) -> Vec<String> {
    let searchable = Searchable::<Filter>::new(
        SearchConfig::new()
            .searchable(["*"])
            .not_searchable(["password"])
            .reserve("sort"),
    )
    .unwrap();
    let params = Params::parse_query(query).unwrap();
    let filter = searchable.filtered(Filter::new(), &params).unwrap();
    let posts = posts();
    filter
        .filter(&posts)
        .into_iter()
        .map(|p| p.title.clone())
        .collect()
}

#[test]
fn numeric_ranges() {
    assert_eq!(
        titles("score=(gt)3&score=(le)10"),
        ["Rust ownership", "Draft notes"]
    );
    assert_eq!(titles("score=!(ge)7"), ["Async in practice"]);
}

#[test]
fn numeric_comparison_is_not_lexical() {
    assert_eq!(titles("score=(gt)9"), ["Rust ownership"]);
}

#[test]
fn patterns() {
    assert_eq!(titles("title=%25in%25"), ["Async in practice"]);
    assert_eq!(titles("title=!rust%25"), ["Async in practice", "Draft notes"]);
}

#[test]
fn membership() {
    assert_eq!(titles("score=3,7"), ["Async in practice", "Draft notes"]);
    assert_eq!(titles("score=!3,7"), ["Rust ownership"]);
}

#[test]
fn booleans() {
    assert_eq!(titles("published=0"), ["Draft notes"]);
    assert_eq!(titles("published=true&score=(lt)5"), ["Async in practice"]);
}

#[test]
fn nulls() {
    assert_eq!(titles("editor=(null)"), ["Async in practice", "Draft notes"]);
    assert_eq!(titles("editor=!(null)"), ["Rust ownership"]);
    assert_eq!(titles("editor=!ed"), Vec::<String>::new());
}

#[test]
fn or_mode() {
    assert_eq!(
        titles("score=10&published=false&mode=or"),
        ["Rust ownership", "Draft notes"]
    );
    assert_eq!(titles("score=10&published=false&mode=bogus"), Vec::<String>::new());
}

#[test]
fn relations() {
    assert_eq!(titles("authors:name=bob"), ["Rust ownership"]);
    assert_eq!(
        titles("!authors:name=bob"),
        ["Async in practice", "Draft notes"]
    );
    assert_eq!(titles("authors:name=%25o%25"), ["Rust ownership", "Async in practice"]);
}

#[test]
fn nested_relation_paths() {
    assert_eq!(titles("authors:tags:name=async"), ["Async in practice"]);
    assert_eq!(titles("authors:tags:name=rust"), ["Rust ownership", "Async in practice"]);
    assert_eq!(titles("!authors:tags:name=rust"), ["Draft notes"]);
}

#[test]
fn unknown_and_denied_fields_are_ignored() {
    assert_eq!(titles("password=x&sort=score").len(), 3);
}
