use serde::Deserialize;

#[derive(Debug, Deserialize, PartialEq)]
struct Article {
    headline: String,
    byline: Byline,
    tags: Vec<String>,
    paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Deserialize, PartialEq)]
struct Byline {
    name: String,
    role: String,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
enum Paragraph {
    Text(String),
    Quote(String),
}

const ARTICLE: &str = "headline: Rivers rise
byline.name: Ada
byline.role: Reporter

[tags]
* weather
* local
[]

[+paragraphs]
Rain fell all night.
quote: It never stopped.
[]
";

#[test]
fn deserializes_into_structs() {
    let article: Article = archieml::from_str(ARTICLE).expect("deserialize");
    assert_eq!(
        article,
        Article {
            headline: "Rivers rise".to_string(),
            byline: Byline {
                name: "Ada".to_string(),
                role: "Reporter".to_string(),
            },
            tags: vec!["weather".to_string(), "local".to_string()],
            paragraphs: vec![
                Paragraph::Text("Rain fell all night.".to_string()),
                Paragraph::Quote("It never stopped.".to_string()),
            ],
        }
    );
}

#[test]
fn missing_fields_fail_deserialization() {
    let err = archieml::from_str::<Article>("headline: only").expect_err("must fail");
    assert_eq!(err.kind, archieml::ErrorKind::Deserialize);
}

#[test]
fn parse_file_reads_from_disk() {
    let dir = std::env::temp_dir().join(format!("archieml-test-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create dir");
    let path = dir.join("article.aml");
    std::fs::write(&path, ARTICLE).expect("write");
    let doc = archieml::parse_file(&path).expect("parse file");
    assert_eq!(doc.text("byline.role"), Some("Reporter"));
    std::fs::remove_dir_all(&dir).expect("cleanup");
}

#[test]
fn missing_file_is_io_error() {
    let err = archieml::parse_file("/definitely/not/here.aml").expect_err("must fail");
    assert_eq!(err.kind, archieml::ErrorKind::Io);
}
