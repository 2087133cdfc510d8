use dry_template::{Model, Options, TemplateSet};
use tracing_subscriber::EnvFilter;

mod templates {
    dry_template::directory!("templates/");
    dry_template::file!("template/pagination.html");
    dry_template::str!("hello_first_last", r#"
        <p>Hello {firstname} {lastname}</p>
    "#);
}


#[derive(Model)]
pub struct User {
    pub name: String,
    pub email: String,
}

#[derive(Model)]
pub struct Blog {
    pub id: u64,
    pub name: String,
    pub summary: String,
    pub content: String,
    pub user: User,
}

/// An error shown to the user, rendered with the `error_alert` template
#[derive(Model)]
#[model(methods(code))]
pub struct ErrorMessage {
    pub message: String,
    #[model(skip)]
    pub error: Option<String>,
}

impl ErrorMessage {
    /// Falls back to a generic server error code
    pub fn code(&self) -> &str {
        self.error.as_deref().unwrap_or("500")
    }
}

/// Reads the missing-field policy from `DRY_TEMPLATE_MISSING` (`lenient` or `strict`)
fn options_from_env() -> Options {
    std::env::var("DRY_TEMPLATE_MISSING")
        .ok()
        .and_then(|mode| serde_json::from_value(serde_json::json!({ "missing": mode })).ok())
        .unwrap_or_default()
}

fn main() -> dry_template::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let blog = Blog {
        id: 42,
        name: "Tom & Jerry".to_string(),
        summary: "A cat <and> a mouse".to_string(),
        content: "<p>Chase scenes.</p>".to_string(),
        user: User {
            name: "Spike".to_string(),
            email: "spike@example.com".to_string(),
        },
    };

    println!("{}", templates::blog_item().render(&blog));

    let error = ErrorMessage {
        message: "Network looks broken (HTTP 502)".to_string(),
        error: Some("http_bad_response".to_string()),
    };
    println!("{}", templates::error_alert().render(&error));

    let page = serde_json::json!({"page": {"index": 2, "count": 7}});
    println!("{}", templates::pagination().render(&page));

    let name = serde_json::json!({"firstname": "King", "lastname": "Tubby"});
    println!("{}", templates::hello_first_last().render(&name));

    let options = options_from_env();
    let set = TemplateSet::from_dir(concat!(env!("CARGO_MANIFEST_DIR"), "/templates"), "html", options)?;
    for name in set.names() {
        tracing::info!(template = name, "loaded");
    }
    println!("{}", set.render("blog/item", &blog)?);

    Ok(())
}
