//! Product management pages.
//!
//! Create and edit forms are multipart so the product photo can be sent with
//! the rest of the fields. Validation failures redirect back to the form with
//! `?error=`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use doughda_core::{NewProduct, Price, Product, ProductId, ProductPatch, ValidationError};
use doughda_storage::RepositoryError;
use tracing::instrument;

use super::{Flash, checkbox, redirect_error, redirect_success};
use crate::error::{AppError, Result};
use crate::filters;
use crate::services::{UPLOAD_BODY_LIMIT, UploadedFile, discard_on_error, save_image};
use crate::state::AppState;

const PRODUCTS_PATH: &str = "/admin/products";

/// Product list template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub current_path: String,
    pub products: Vec<Product>,
    pub flash: Flash,
}

/// Product form template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "products/form.html")]
pub struct ProductFormTemplate {
    pub current_path: String,
    pub heading: String,
    pub action: String,
    pub product: Option<Product>,
    pub flash: Flash,
}

/// Fields of the multipart product form.
#[derive(Debug, Default)]
pub struct ProductForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub is_sold_out: bool,
    pub remove_image: bool,
    pub image: Option<UploadedFile>,
}

impl ProductForm {
    /// Read all known fields from a multipart body; unknown fields are skipped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` if the multipart stream is malformed.
    pub async fn read(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();
        let mut sold_out = None;
        let mut remove_image = None;

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };
            match name.as_str() {
                "image" => form.image = UploadedFile::from_field(field).await?,
                "name" => form.name = Some(field.text().await?),
                "description" => form.description = Some(field.text().await?),
                "price" => form.price = Some(field.text().await?),
                "isSoldOut" => sold_out = Some(field.text().await?),
                "removeImage" => remove_image = Some(field.text().await?),
                _ => {}
            }
        }

        form.is_sold_out = checkbox(sold_out.as_deref());
        form.remove_image = checkbox(remove_image.as_deref());
        Ok(form)
    }

    fn parsed_price(&self) -> std::result::Result<Price, ValidationError> {
        self.price.as_deref().unwrap_or_default().parse()
    }
}

/// Build the product pages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/products",
            get(index).post(create).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/admin/products/new", get(new))
        .route("/admin/products/{id}/edit", get(edit))
        .route(
            "/admin/products/{id}",
            post(update).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/admin/products/{id}/sold-out", post(toggle_sold_out))
        .route("/admin/products/{id}/delete", post(delete))
}

/// GET /admin/products
#[instrument(skip(state))]
async fn index(
    State(state): State<AppState>,
    Query(flash): Query<Flash>,
) -> Result<ProductsIndexTemplate> {
    Ok(ProductsIndexTemplate {
        current_path: PRODUCTS_PATH.to_string(),
        products: state.storage().products().list().await?,
        flash,
    })
}

/// GET /admin/products/new
async fn new(Query(flash): Query<Flash>) -> ProductFormTemplate {
    ProductFormTemplate {
        current_path: PRODUCTS_PATH.to_string(),
        heading: "새 상품".to_string(),
        action: PRODUCTS_PATH.to_string(),
        product: None,
        flash,
    }
}

/// GET /admin/products/{id}/edit
#[instrument(skip(state))]
async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(flash): Query<Flash>,
) -> Result<Response> {
    let product = match state.storage().products().get(&ProductId::new(id)).await {
        Ok(product) => product,
        Err(RepositoryError::NotFound) => {
            return Ok(redirect_error(PRODUCTS_PATH, "상품을 찾을 수 없습니다.").into_response());
        }
        Err(e) => return Err(e.into()),
    };

    Ok(ProductFormTemplate {
        current_path: PRODUCTS_PATH.to_string(),
        heading: format!("{} 수정", product.name),
        action: format!("{PRODUCTS_PATH}/{}", product.id),
        product: Some(product),
        flash,
    }
    .into_response())
}

/// POST /admin/products
#[instrument(skip_all)]
async fn create(State(state): State<AppState>, multipart: Multipart) -> Result<Redirect> {
    let form = ProductForm::read(multipart).await?;
    let back = "/admin/products/new";

    let name = form.name.clone().unwrap_or_default();
    if name.trim().is_empty() {
        return Ok(redirect_error(back, &ValidationError::Required("name").to_string()));
    }
    let price = match form.parsed_price() {
        Ok(price) => price,
        Err(e) => return Ok(redirect_error(back, &e.to_string())),
    };

    let image = match form.image {
        Some(file) => match save_image(state.storage(), file).await {
            Ok(asset) => Some(asset.url),
            Err(AppError::Validation(e)) => return Ok(redirect_error(back, &e.to_string())),
            Err(e) => return Err(e),
        },
        None => None,
    };

    let input = NewProduct {
        name,
        description: form.description,
        price: Some(price),
        image: image.clone(),
        is_sold_out: form.is_sold_out,
    };
    let result = state.storage().products().create(input).await;
    match discard_on_error(state.storage(), image.as_deref(), result).await {
        Ok(product) => Ok(redirect_success(
            PRODUCTS_PATH,
            &format!("{} 상품이 등록되었습니다.", product.name),
        )),
        Err(RepositoryError::Validation(e)) => Ok(redirect_error(back, &e.to_string())),
        Err(e) => Err(e.into()),
    }
}

/// POST /admin/products/{id}
#[instrument(skip(state, multipart))]
async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Redirect> {
    let form = ProductForm::read(multipart).await?;
    let id = ProductId::new(id);
    let back = format!("{PRODUCTS_PATH}/{id}/edit");
    let products = state.storage().products();

    match products.get(&id).await {
        Ok(_) => {}
        Err(RepositoryError::NotFound) => {
            return Ok(redirect_error(PRODUCTS_PATH, "상품을 찾을 수 없습니다."));
        }
        Err(e) => return Err(e.into()),
    }
    let price = match form.parsed_price() {
        Ok(price) => price,
        Err(e) => return Ok(redirect_error(&back, &e.to_string())),
    };
    if form.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Ok(redirect_error(&back, &ValidationError::Required("name").to_string()));
    }

    let new_image = match form.image {
        Some(file) => match save_image(state.storage(), file).await {
            Ok(asset) => Some(asset.url),
            Err(AppError::Validation(e)) => return Ok(redirect_error(&back, &e.to_string())),
            Err(e) => return Err(e),
        },
        None => None,
    };
    let patch = ProductPatch {
        id: None,
        name: form.name,
        description: Some(form.description.unwrap_or_default()),
        price: Some(price),
        image: new_image
            .clone()
            .or_else(|| form.remove_image.then(String::new)),
        is_sold_out: Some(form.is_sold_out),
    };
    let result = products.update(&id, patch).await;
    let updated = discard_on_error(state.storage(), new_image.as_deref(), result).await?;

    Ok(redirect_success(
        PRODUCTS_PATH,
        &format!("{} 상품이 수정되었습니다.", updated.name),
    ))
}

/// POST /admin/products/{id}/sold-out
#[instrument(skip(state))]
async fn toggle_sold_out(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    match state.storage().products().toggle_sold_out(&ProductId::new(id)).await {
        Ok(product) => {
            let label = if product.is_sold_out { "품절" } else { "판매 중" };
            Ok(redirect_success(
                PRODUCTS_PATH,
                &format!("{} 상품을 {label}(으)로 변경했습니다.", product.name),
            ))
        }
        Err(RepositoryError::NotFound) => Ok(redirect_error(PRODUCTS_PATH, "상품을 찾을 수 없습니다.")),
        Err(e) => Err(e.into()),
    }
}

/// POST /admin/products/{id}/delete
#[instrument(skip(state))]
async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Result<Redirect> {
    match state.storage().products().delete(&ProductId::new(id)).await {
        Ok(product) => Ok(redirect_success(
            PRODUCTS_PATH,
            &format!("{} 상품이 삭제되었습니다.", product.name),
        )),
        Err(RepositoryError::NotFound) => Ok(redirect_error(PRODUCTS_PATH, "상품을 찾을 수 없습니다.")),
        Err(e) => Err(e.into()),
    }
}
