use leptos::prelude::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};

use velo::activity::LogEntry;
use velo::clock::{Clock, WallClock};
use velo::error::SyncError;
use velo::model::ViewModel;
use velo::notify::Notice;
use velo::runtime::{ClientRuntime, UserAction};
use velo::schedule::{PollScheduler, TickActions};
use velo::wire::{ActionResponse, LogsResponse, StatusResponse};

const API_BASE: &str = "/api";

/// Single driver tick for the scheduler and notice timers. Fine-grained so
/// the 100ms debounce settle lands close to its deadline.
const DRIVER_TICK_MS: i32 = 50;

pub fn start() {
    mount_to_body(|| view! { <App /> });
}

#[component]
fn App() -> impl IntoView {
    let runtime = StoredValue::new(ClientRuntime::new());
    let scheduler = StoredValue::new(PollScheduler::new());
    let clock = StoredValue::new(WallClock::new());

    let (model, set_model) = signal(ViewModel::default());
    let (log_entries, set_log_entries) = signal(Vec::<LogEntry>::new());
    let (notices, set_notices) = signal(Vec::<Notice>::new());
    let (interval_id, set_interval_id) = signal::<Option<i32>>(None);

    let now_ms = move || clock.with_value(|c| c.now_ms());

    // Mirrors the engine state into the reactive signals after every
    // mutation. The engine itself never touches the DOM.
    let publish = move || {
        runtime.with_value(|r| {
            set_model.set(r.model.clone());
            set_log_entries.set(r.log.entries().to_vec());
            set_notices.set(r.notices.visible().to_vec());
        });
    };

    let run_status = move || {
        spawn_local(async move {
            let result = fetch_status().await;
            runtime.update_value(|r| r.apply_status(now_ms(), result));
            publish();
        });
    };

    let run_logs = move || {
        spawn_local(async move {
            let result = fetch_logs().await;
            // Log-poll failures are non-critical: console only, no notice.
            if let Err(err) = &result {
                web_sys::console::warn_1(&format!("log poll failed: {err}").into());
            }
            runtime.update_value(|r| r.apply_logs(result));
            publish();
        });
    };

    let dispatch = move |actions: TickActions| {
        if actions.run_status {
            run_status();
        }
        if actions.run_logs {
            run_logs();
        }
    };

    let do_action = move |action: UserAction| {
        spawn_local(async move {
            runtime.update_value(|r| r.begin_action(now_ms(), action));
            publish();

            let result = post_action(action).await;
            runtime.update_value(|r| r.apply_action(now_ms(), action, result));
            // Pull fresh flags soon after the action lands; the debounce
            // collapses this with any imminent interval trigger.
            scheduler.update_value(|s| s.request_status(now_ms()));
            publish();
        });
    };

    let drive = move || {
        let now = now_ms();
        let mut actions = TickActions::default();
        scheduler.update_value(|s| actions = s.advance(now));
        runtime.update_value(|r| r.tick_notices(now));
        dispatch(actions);
        publish();
    };

    let start_polling = move || {
        if interval_id.get_untracked().is_some() {
            return;
        }
        let mut first = TickActions::default();
        scheduler.update_value(|s| first = s.start(now_ms()));
        dispatch(first);

        let window = match web_sys::window() {
            Some(w) => w,
            None => return,
        };
        let cb = Closure::wrap(Box::new(move || drive()) as Box<dyn FnMut()>);
        match window.set_interval_with_callback_and_timeout_and_arguments_0(
            cb.as_ref().unchecked_ref(),
            DRIVER_TICK_MS,
        ) {
            Ok(id) => {
                cb.forget();
                set_interval_id.set(Some(id));
            }
            Err(_) => {
                web_sys::console::warn_1(&"failed to start poll driver".into());
            }
        }
    };

    start_polling();

    on_cleanup(move || {
        scheduler.update_value(|s| s.stop());
        if let Some(id) = interval_id.get_untracked() {
            if let Some(w) = web_sys::window() {
                w.clear_interval_with_handle(id);
            }
        }
    });

    view! {
        <main class="app">
            <header class="app-header">
                <h1 class="brand">"velo"</h1>
                <div class="indicators">
                    <span class=move || {
                        if model.get().connected { "indicator connected" } else { "indicator" }
                    }>
                        {move || if model.get().connected { "Connected" } else { "Disconnected" }}
                    </span>
                    <Show when=move || model.get().training>
                        <span class="indicator training">"Training"</span>
                    </Show>
                </div>
            </header>

            <section class="metrics">
                <Metric label="Power" value=move || model.get().power_label />
                <Metric label="Cadence" value=move || model.get().cadence_label />
                <Metric label="Speed" value=move || model.get().speed_label />
                <Metric label="Duration" value=move || model.get().duration_label />
                <Metric label="Samples" value=move || model.get().data_count.to_string() />
            </section>

            <section class="controls">
                <button on:click=move |_| {
                    let action = if model.get_untracked().connected {
                        UserAction::Disconnect
                    } else {
                        UserAction::Connect
                    };
                    do_action(action);
                }>
                    {move || if model.get().connected { "Disconnect" } else { "Connect" }}
                </button>
                <button
                    disabled=move || !model.get().controls.start_enabled
                    on:click=move |_| do_action(UserAction::Start)
                >
                    "Start"
                </button>
                <button
                    disabled=move || !model.get().controls.stop_enabled
                    on:click=move |_| do_action(UserAction::Stop)
                >
                    "Stop"
                </button>
                <button
                    disabled=move || !model.get().controls.export_enabled
                    on:click=move |_| do_action(UserAction::Export)
                >
                    "Export"
                </button>
                <button class="ghost" on:click=move |_| do_action(UserAction::ClearLogs)>
                    "Clear log"
                </button>
            </section>

            <section class="activity">
                <h2>"Activity"</h2>
                <ul class="log-list">
                    <For
                        each=move || log_entries.get()
                        key=|e| e.id
                        children=move |entry| {
                            let class = match entry.level {
                                velo::activity::LogLevel::Info => "log info",
                                velo::activity::LogLevel::Success => "log success",
                                velo::activity::LogLevel::Error => "log error",
                            };
                            view! {
                                <li class=class>
                                    <span class="log-time">{entry.timestamp.clone()}</span>
                                    <span class="log-level">{entry.level.label()}</span>
                                    <span class="log-message">{entry.message.clone()}</span>
                                </li>
                            }
                        }
                    />
                </ul>
            </section>

            <NoticeOverlay notices=notices />
        </main>
    }
}

#[component]
fn Metric(label: &'static str, value: impl Fn() -> String + Send + 'static) -> impl IntoView {
    view! {
        <div class="metric">
            <div class="metric-label">{label}</div>
            <div class="metric-value">{value}</div>
        </div>
    }
}

#[component]
fn NoticeOverlay(notices: ReadSignal<Vec<Notice>>) -> impl IntoView {
    view! {
        <div class="notice-stack" aria-live="polite" aria-relevant="additions removals">
            <For
                each=move || notices.get()
                key=|n| n.id
                children=move |n| {
                    view! { <div class=n.css_class()>{n.message.clone()}</div> }
                }
            />
        </div>
    }
}

async fn fetch_status() -> Result<StatusResponse, SyncError> {
    let body = fetch_text("GET", "status").await?;
    serde_json::from_str(&body).map_err(|e| SyncError::Shape(e.to_string()))
}

async fn fetch_logs() -> Result<LogsResponse, SyncError> {
    let body = fetch_text("GET", "logs").await?;
    serde_json::from_str(&body).map_err(|e| SyncError::Shape(e.to_string()))
}

async fn post_action(action: UserAction) -> Result<ActionResponse, SyncError> {
    let body = fetch_text("POST", action.endpoint()).await?;
    serde_json::from_str(&body).map_err(|e| SyncError::Shape(e.to_string()))
}

/// Issues the request and surfaces transport/shape failures as the engine's
/// error taxonomy. No timeout here: the browser's own fetch errors are the
/// only abort path, and the next poll is the retry.
async fn fetch_text(method: &str, path: &str) -> Result<String, SyncError> {
    let window =
        web_sys::window().ok_or_else(|| SyncError::Transport("no window".to_string()))?;

    let opts = web_sys::RequestInit::new();
    opts.set_method(method);
    let url = format!("{API_BASE}/{path}");
    let request = web_sys::Request::new_with_str_and_init(&url, &opts)
        .map_err(|_| SyncError::Transport(format!("{path}: bad request")))?;

    let resp = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|_| SyncError::Transport(format!("{path}: network error")))?;
    let resp: web_sys::Response = resp
        .dyn_into()
        .map_err(|_| SyncError::Transport(format!("{path}: not a response")))?;

    if !resp.ok() {
        return Err(SyncError::Transport(format!(
            "{path}: HTTP {}",
            resp.status()
        )));
    }

    let text = resp
        .text()
        .map_err(|_| SyncError::Shape(format!("{path}: unreadable body")))?;
    let text = JsFuture::from(text)
        .await
        .map_err(|_| SyncError::Shape(format!("{path}: unreadable body")))?;
    text.as_string()
        .ok_or_else(|| SyncError::Shape(format!("{path}: body is not text")))
}
