use std::cell::RefCell;
use std::io;
use std::rc::Rc;

use ratzilla::event::KeyCode;
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use trendboard_core::{DashboardConfig, TrendsSnapshot};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Request, RequestCache, RequestInit, RequestMode, Response};

mod dashboard;

use dashboard::Dashboard;

const TRENDS_URL: &str = "data/trends.json";

fn main() -> io::Result<()> {
    let state = Rc::new(RefCell::new(Dashboard::new(DashboardConfig::default())));

    spawn_local(fetch_trends(state.clone()));

    let backend = DomBackend::new()?;
    let mut terminal = Terminal::new(backend)?;

    terminal.on_key_event({
        let state = state.clone();
        move |event| match event.code {
            KeyCode::Char('p' | ' ') => state.borrow_mut().toggle_ticker(),
            KeyCode::Char('r') => spawn_local(fetch_trends(state.clone())),
            _ => {}
        }
    });

    terminal.draw_web(move |f| {
        let now = js_sys::Date::now() / 1000.0;
        state.borrow_mut().draw(f, now);
    });

    Ok(())
}

/// One load: on failure the error goes to the console and nothing is drawn.
async fn fetch_trends(store: Rc<RefCell<Dashboard>>) {
    match fetch_snapshot().await {
        Ok(snapshot) => store.borrow_mut().apply_snapshot(&snapshot),
        Err(message) => web_sys::console::error_1(&message.into()),
    }
}

async fn fetch_snapshot() -> Result<TrendsSnapshot, String> {
    let window = web_sys::window().ok_or("No window to fetch from")?;

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);
    opts.set_cache(RequestCache::NoStore);

    let request = Request::new_with_str_and_init(TRENDS_URL, &opts)
        .map_err(|e| format!("Failed to build request for {TRENDS_URL}: {e:?}"))?;

    let response_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("Failed to fetch {TRENDS_URL}: {e:?}"))?;

    let response = response_value
        .dyn_into::<Response>()
        .map_err(|_| "Failed to read response".to_string())?;
    if !response.ok() {
        return Err(format!("Failed to fetch {TRENDS_URL}: HTTP {}", response.status()));
    }

    let body = response
        .json()
        .map_err(|e| format!("Failed to read {TRENDS_URL} body: {e:?}"))?;
    let json = JsFuture::from(body)
        .await
        .map_err(|e| format!("Failed to read {TRENDS_URL} body: {e:?}"))?;

    serde_wasm_bindgen::from_value::<TrendsSnapshot>(json)
        .map_err(|error| format!("Failed to parse {TRENDS_URL}: {error}"))
}
