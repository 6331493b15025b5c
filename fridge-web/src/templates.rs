use minijinja::Environment;

pub const HOME: &str = "home.html";
pub const LIST: &str = "list.html";

/// Template environment with the page templates compiled in.
///
/// Names end in `.html`, so every interpolated value is HTML-escaped.
pub fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.add_template(HOME, include_str!("../templates/home.html"))?;
    env.add_template(LIST, include_str!("../templates/list.html"))?;
    Ok(env)
}
