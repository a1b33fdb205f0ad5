use crate::*;
use axum::extract::rejection::{FormRejection, QueryRejection};
use std::net::{Ipv6Addr, SocketAddr};
use tower_http::{catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer};

mod shutdown;
pub use shutdown::*;

mod traces;
pub use traces::*;

pub use tokio::runtime::Runtime;

/// Query of the list page, `edit` selects the todo rendered as an inline form
#[derive(Debug, Default)]
pub struct ViewParams {
    pub edit: Option<String>,
}

/// Repeated keys don't fail the query, the last value wins
impl FromIterator<(String, String)> for ViewParams {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(pairs: I) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            if key == "edit" {
                params.edit = Some(value);
            }
        }
        params
    }
}

/// Router with the list page, the mutation endpoint and a couple of utility routes
pub fn app(store: TodoStore) -> Router {
    route("/", get(show_todos).post(apply_action))
        .route(STYLESHEET_PATH, get(stylesheet))
        .route("/health", get(StatusCode::OK))
        .with_state(store)
}

async fn show_todos(
    State(store): State<TodoStore>,
    query: std::result::Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Markup> {
    let Query(pairs) = query?;
    let params: ViewParams = pairs.into_iter().collect();
    let editing = params.edit.and_then(|id| id.trim().parse::<TodoId>().ok());
    let todos = store.load().await?;
    Ok(todo_page(&todos, editing))
}

async fn apply_action(
    State(store): State<TodoStore>,
    form: std::result::Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Redirect> {
    let Form(pairs) = form?;
    let form: ActionForm = pairs.into_iter().collect();
    handle_action(&store, form.into()).await?;
    // back to the list so that refreshing the page doesn't resubmit the form
    Ok(Redirect::to("/"))
}

async fn stylesheet() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, HeaderValue::from_static("text/css; charset=utf-8"))],
        STYLESHEET,
    )
}

/// Utility trait to use Router as the host
pub trait HostUtils {
    /// Adds tracing and utility layers and starts the server
    fn run(self, config: &AppConfig) -> Result;
    fn serve(self, config: &AppConfig) -> Result;
    fn add_tracing(self) -> Self;
    fn add_utility_layers(self, config: &AppConfig) -> Self;
}

impl HostUtils for Router {
    fn run(self, config: &AppConfig) -> Result {
        self.add_tracing().add_utility_layers(config).serve(config)
    }
    fn serve(self, config: &AppConfig) -> Result {
        let runtime = Runtime::new()?;
        runtime.block_on(async move {
            let shutdown = Shutdown::default();
            tokio::spawn(shutdown.clone().listen());

            let addr = bind_addr(config.port);
            #[cfg(debug_assertions)]
            info!(target: "server", "Starting serving {} at {}", config.name, localhost(config.port));
            #[cfg(not(debug_assertions))]
            info!(target: "server", "Starting serving {} at {addr}", config.name);
            axum_server::bind(addr)
                .handle(shutdown.new_server_handle())
                .serve(self.into_make_service())
                .await
        })?;
        info!(target: "server", "Server stopped");
        Ok(())
    }
    fn add_tracing(self) -> Self {
        self.layer(trace_layer())
    }
    fn add_utility_layers(self, config: &AppConfig) -> Self {
        let host_services = ServiceBuilder::new()
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(RequestBodyLimitLayer::new(config.request_body_limit));
        #[cfg(not(debug_assertions))]
        let host_services = host_services.layer(tower_http::compression::CompressionLayer::new());
        self.layer(host_services)
    }
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic message".to_string()
    };

    error!("Panic occured: {details}");

    #[cfg(debug_assertions)]
    let body = format!("Panic: {details}");
    #[cfg(not(debug_assertions))]
    let body = "Internal error".to_owned();

    (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
}

/// Dual-stack wildcard address for the server
fn bind_addr(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv6Addr::UNSPECIFIED, port))
}

#[cfg_attr(not(debug_assertions), allow(dead_code))]
fn localhost(port: u16) -> String {
    format!(
        "http://localhost{}",
        if port == 80 {
            "".to_owned()
        } else {
            format!(":{port}")
        }
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localhost_hides_default_port() {
        assert_eq!(localhost(80), "http://localhost");
        assert_eq!(localhost(8080), "http://localhost:8080");
    }

    #[test]
    fn binds_every_interface() {
        let addr = bind_addr(8080);
        assert!(addr.is_ipv6());
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn last_edit_param_wins() {
        let pairs = [("edit", "1"), ("other", "x"), ("edit", "2")]
            .map(|(k, v)| (k.to_owned(), v.to_owned()));
        let params: ViewParams = pairs.into_iter().collect();
        assert_eq!(params.edit.as_deref(), Some("2"));
    }

    #[test]
    fn panics_turn_into_500() {
        let resp = handle_panic(Box::new("boom"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let resp = handle_panic(Box::new(42u8));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
