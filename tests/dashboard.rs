use std::sync::Arc;

use travel_admin::context::{AppContext, sidebar_counts};
use travel_admin::controller::FetchOutcome;
use travel_admin::domain::resource::ResourceKind;
use travel_admin::domain::trip::Tour;
use travel_admin::domain::types::EntityId;
use travel_admin::models::config::ConsoleConfig;
use travel_admin::notifications::LogNotifier;
use travel_admin::services::dashboard::refresh_sidebar_counts;

use common::{FakeBackend, ScriptedConfirm};

mod common;

#[tokio::test]
async fn test_screens_read_counts_published_by_the_dashboard() {
    let backend = Arc::new(FakeBackend::with_tours(20));
    let (writer, reader) = sidebar_counts();
    let ctx = AppContext::new(ConsoleConfig::new("http://localhost/api/"), reader);

    refresh_sidebar_counts(backend.as_ref(), &ctx.config.dashboard_endpoint, &writer)
        .await
        .unwrap();
    assert_eq!(ctx.sidebar.current().get(ResourceKind::Tours), 20);

    let controller = ctx.list_controller::<Tour, _>(
        backend.clone(),
        Arc::new(LogNotifier),
        Arc::new(ScriptedConfirm::new(true)),
    );
    assert_eq!(controller.endpoints().list, "/tours");
    assert_eq!(controller.mount().await, FetchOutcome::Applied);

    controller
        .remove(&EntityId::new("t20").unwrap())
        .await
        .unwrap();
    refresh_sidebar_counts(backend.as_ref(), &ctx.config.dashboard_endpoint, &writer)
        .await
        .unwrap();

    assert_eq!(ctx.sidebar.current().get(ResourceKind::Tours), 19);
    assert_eq!(ctx.sidebar.current().get(ResourceKind::Blogs), 0);
}
