use crate::error::AppError;
use crate::state::AppState;
use crate::templates;
use axum::Form;
use axum::extract::{Path, State};
use axum::response::{Html, Redirect};
use minijinja::context;
use serde::Deserialize;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub item_text: String,
}

impl NewItem {
    fn text(&self) -> Result<&str, AppError> {
        let text = self.item_text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyItem);
        }
        Ok(text)
    }
}

pub fn list_url(list_id: i64) -> String {
    format!("/fridge/{}/", list_id)
}

fn parse_list_id(raw: &str) -> Result<i64, AppError> {
    raw.parse()
        .map_err(|_| AppError::ListNotFound(raw.to_string()))
}

pub async fn home_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.render(templates::HOME, context! {})?))
}

/// Starts a new list holding the posted item.
pub async fn new_list(
    State(state): State<AppState>,
    Form(form): Form<NewItem>,
) -> Result<Redirect, AppError> {
    let text = form.text()?;
    let (list_id, _) = state.db()?.create_list_with_item(text)?;

    info!(list_id, "Created fridge list");
    Ok(Redirect::to(&list_url(list_id)))
}

pub async fn add_item(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    Form(form): Form<NewItem>,
) -> Result<Redirect, AppError> {
    let list_id = parse_list_id(&list_id)?;

    {
        let db = state.db()?;
        let list = db
            .find_list(list_id)?
            .ok_or_else(|| AppError::ListNotFound(list_id.to_string()))?;
        db.add_item(list.id, form.text()?)?;
    }

    info!(list_id, "Added item to fridge list");
    Ok(Redirect::to(&list_url(list_id)))
}

pub async fn view_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Html<String>, AppError> {
    let list_id = parse_list_id(&list_id)?;

    let (list, items) = {
        let db = state.db()?;
        let list = db
            .find_list(list_id)?
            .ok_or_else(|| AppError::ListNotFound(list_id.to_string()))?;
        let items = db.items_for_list(list.id)?;
        (list, items)
    };

    Ok(Html(state.render(
        templates::LIST,
        context! { list => list, items => items },
    )?))
}
