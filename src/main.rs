#[cfg(feature = "ssr")]
#[tokio::main]
async fn main() {
    use axum::Router;
    use leptos::logging::log;
    use leptos::prelude::*;
    use leptos_axum::{generate_route_list, LeptosRoutes};
    use puzzle_hub::app::*;
    use puzzle_hub::config::ServiceConfig;
    use std::sync::{Arc, RwLock};

    let config = ServiceConfig::from_env().expect("Invalid service configuration.");
    let catalog = config.load_catalog().expect("Failed to load fixtures.");
    log!(
        "loaded {} puzzles, {} scores and {} daily challenges (latency x{})",
        catalog.puzzles.len(),
        catalog.leaderboard.len(),
        catalog.daily_challenges.len(),
        config.latency_scale
    );
    let catalog: SharedCatalog = Arc::new(RwLock::new(catalog));

    let conf = get_configuration(None).unwrap();
    let addr = conf.leptos_options.site_addr;
    let leptos_options = conf.leptos_options;
    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(App);

    let leptos_options_clone = leptos_options.clone();
    let app = Router::new()
        .leptos_routes_with_context(
            &leptos_options,
            routes,
            // Provide the catalog and its config for server functions.
            move || {
                provide_context(catalog.clone());
                provide_context(config.clone());
            },
            // Use App for main routes.
            move || shell(leptos_options_clone.clone()),
        )
        // Use shell for fallback.
        .fallback(leptos_axum::file_and_error_handler(shell))
        .with_state(leptos_options.clone());

    log!("listening on http://{}", &addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app.into_make_service())
        .await
        .unwrap();
}

#[cfg(not(feature = "ssr"))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}
