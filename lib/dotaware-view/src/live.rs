use crate::html::page;
use crate::node::{Element, Node};
use crate::projection::{project, ProjectionOptions};
use dotaware_store::{Error, Message, RecordStore};
use std::sync::{Arc, PoisonError, RwLock};
use tracing::debug;

/// Receiver of every freshly projected view. Each call fully replaces what
/// was rendered before.
pub trait Render {
    fn render(&mut self, view: &Node);
}

/// Keeps a [`RecordStore`] and its rendered projection in step: every
/// applied message is followed by exactly one call to [`Render::render`].
#[derive(Debug)]
pub struct LiveView<R: Render> {
    store: RecordStore,
    options: ProjectionOptions,
    renderer: R,
}

impl<R: Render> LiveView<R> {
    pub fn new(options: ProjectionOptions, renderer: R) -> Self {
        Self {
            store: RecordStore::new(),
            options,
            renderer,
        }
    }

    pub fn apply(&mut self, message: Message) {
        self.store.apply(message);
        self.refresh();
    }

    /// Parse and apply a JSON message. Nothing is re-rendered when parsing fails.
    pub fn apply_json(&mut self, json: &str) -> Result<(), Error> {
        self.store.apply_json(json)?;
        self.refresh();
        Ok(())
    }

    /// Re-project the current store and hand the result to the renderer.
    pub fn refresh(&mut self) {
        let view = project(&self.store, &self.options);
        debug!("Rendering {} live matches", self.store.len());
        self.renderer.render(&view);
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}

#[derive(Debug, Clone)]
struct Rendered {
    view: Node,
    html: String,
}

/// [`Render`] target holding the latest view as a full HTML page. Clones
/// share the same snapshot, so one can be handed to a web server while
/// another is driven by a [`LiveView`].
#[derive(Debug, Clone)]
pub struct HtmlSnapshot {
    refresh_secs: Option<u64>,
    latest: Arc<RwLock<Rendered>>,
}

impl HtmlSnapshot {
    pub fn new(refresh_secs: Option<u64>) -> Self {
        let view: Node = Element::new("ul").class("games").into();
        let html = page(&view, refresh_secs);
        Self {
            refresh_secs,
            latest: Arc::new(RwLock::new(Rendered { view, html })),
        }
    }

    pub fn html(&self) -> String {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .html
            .clone()
    }

    pub fn view(&self) -> Node {
        self.latest
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .view
            .clone()
    }
}

impl Render for HtmlSnapshot {
    fn render(&mut self, view: &Node) {
        let html = page(view, self.refresh_secs);
        let mut latest = self.latest.write().unwrap_or_else(PoisonError::into_inner);
        *latest = Rendered {
            view: view.clone(),
            html,
        };
    }
}
