//! Reorderable list editor
//!
//! [`ListEditor`] loads the children of a parent record through a
//! [`RemoteDataGateway`], lets the user resize columns and drag rows into a
//! new order, and saves the order back. All mutation happens locally until
//! [`ListEditor::save`]; a successful save reloads from the source.
//!
//! The editor is headless. The host renders from [`ListEditor::state`] (or
//! watches [`ListEditor::store`] for changes) and forwards pointer and drag
//! events to the `resize_*` and `drag_*` handlers, honouring the returned
//! [`EventResult`].

mod capture;
mod events;
mod reorder;
mod resize;
mod state;

pub use capture::*;
pub use events::*;
pub use reorder::move_row;
pub use state::*;

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::sync::PoisonError;

use crate::config::EditorConfig;
use crate::error::EditorError;
use crate::gateway::FetchResult;
use crate::gateway::RemoteDataGateway;
use crate::model::ColumnModel;
use crate::model::RowModel;
use crate::notify::Notification;
use crate::notify::NotificationSink;
use crate::state::Store;

use resize::ResizeSession;
use resize::with_column_width;

const SUCCESS_TITLE: &str = "Success";
const ERROR_TITLE: &str = "Error";
/// Message of the notification raised after a successful save.
pub const SAVE_SUCCESS_MESSAGE: &str = "Sort order saved.";

/// Transient pointer interaction state.
#[derive(Debug, Default)]
struct Interaction {
    /// The active column resize, if any.
    resize: Option<ResizeSession>,
    /// Index of the row being dragged.
    drag_source: Option<usize>,
}

/// Marks the editor busy for its lifetime.
struct BusyGuard<'a> {
    state: &'a Store<EditorState>,
}

impl<'a> BusyGuard<'a> {
    fn begin(state: &'a Store<EditorState>) -> Result<Self, EditorError> {
        let started = state.update_if(|s| !std::mem::replace(&mut s.is_loading, true));
        if started {
            Ok(Self { state })
        } else {
            log::warn!("ListEditor: rejected call while busy");
            Err(EditorError::Busy)
        }
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.state.update(|s| s.is_loading = false);
    }
}

/// Columns and rows built from one fetch.
struct Loaded {
    object_label: String,
    columns: Vec<ColumnModel>,
    rows: Vec<RowModel>,
}

impl Loaded {
    fn build(result: FetchResult, order_field: &str) -> Result<Self, EditorError> {
        let columns: Vec<ColumnModel> = result
            .field_labels
            .iter()
            .map(|l| ColumnModel::new(l.key.clone(), l.label.clone()))
            .collect();

        let rows = result
            .records
            .iter()
            .enumerate()
            .map(|(idx, record)| {
                let id = record
                    .id()
                    .cloned()
                    .ok_or(EditorError::MissingRecordId { position: idx + 1 })?;
                Ok(RowModel::from_record(id, record, order_field, &columns, idx + 1))
            })
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(Self {
            object_label: result.object_label,
            columns,
            rows,
        })
    }
}

/// The reorderable list editor.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use sorter_lib::{EditorConfig, ListEditor};
/// use sorter_lib::notify::ToastQueue;
///
/// let toasts = Arc::new(ToastQueue::new());
/// let editor = ListEditor::new(config, gateway, toasts.clone());
/// editor.load().await?;
///
/// editor.drag_start(2);
/// editor.drop_at(0);
/// editor.save().await?;
/// ```
pub struct ListEditor {
    config: EditorConfig,
    gateway: Arc<dyn RemoteDataGateway>,
    notifier: Arc<dyn NotificationSink>,
    capture: Arc<dyn PointerCapture>,
    state: Store<EditorState>,
    interaction: Mutex<Interaction>,
}

impl ListEditor {
    /// Creates an editor with empty state. Call [`load`](Self::load) to populate it.
    pub fn new(
        config: EditorConfig,
        gateway: Arc<dyn RemoteDataGateway>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            config,
            gateway,
            notifier,
            capture: Arc::new(NoCapture),
            state: Store::default(),
            interaction: Mutex::new(Interaction::default()),
        }
    }

    /// Sets the host hook that registers viewport listeners during a resize.
    pub fn with_pointer_capture(mut self, capture: Arc<dyn PointerCapture>) -> Self {
        self.capture = capture;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Returns a snapshot of the current state.
    pub fn state(&self) -> EditorState {
        self.state.get()
    }

    /// Returns a handle to the observable state.
    pub fn store(&self) -> Store<EditorState> {
        self.state.clone()
    }

    /// Returns `true` while a load or save is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.read(|s| s.is_loading)
    }

    fn interaction(&self) -> MutexGuard<'_, Interaction> {
        self.interaction.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Load / save
    // =========================================================================

    /// Loads the records from the gateway.
    ///
    /// On failure the normalized message is stored in
    /// [`EditorState::error_message`] and the error is returned; previously
    /// loaded rows and columns stay in memory.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Busy`] if a load or save is already in flight
    /// - [`EditorError::Config`] if an input is missing (the gateway is not called)
    /// - [`EditorError::Gateway`] if the fetch fails
    /// - [`EditorError::MissingRecordId`] if a record has no id
    pub async fn load(&self) -> Result<(), EditorError> {
        let _busy = BusyGuard::begin(&self.state)?;
        self.run_load().await
    }

    /// Persists the current row order, then reloads.
    ///
    /// A success notification is raised before the reload. On failure an
    /// error notification is raised, nothing is reloaded and the unsaved
    /// order is kept so the save can be retried.
    ///
    /// # Errors
    ///
    /// - [`EditorError::Busy`] if a load or save is already in flight
    /// - [`EditorError::Config`] / [`EditorError::Gateway`] if persisting fails
    /// - any [`load`](Self::load) error from the reload that follows a
    ///   successful persist
    pub async fn save(&self) -> Result<(), EditorError> {
        let _busy = BusyGuard::begin(&self.state)?;

        if let Err(err) = self.persist().await {
            let message = err.user_message();
            log::error!("ListEditor: save failed: {}", message);
            self.notifier.notify(Notification::error(ERROR_TITLE, message));
            return Err(err);
        }

        self.notifier
            .notify(Notification::success(SUCCESS_TITLE, SAVE_SUCCESS_MESSAGE));
        self.run_load().await
    }

    async fn run_load(&self) -> Result<(), EditorError> {
        self.state.update(|s| s.error_message = None);

        match self.fetch().await {
            Ok(loaded) => {
                log::debug!(
                    "ListEditor: loaded {} rows, {} columns",
                    loaded.rows.len(),
                    loaded.columns.len()
                );
                self.state.update(|s| {
                    s.object_label = Some(loaded.object_label);
                    s.columns = loaded.columns;
                    s.rows = loaded.rows;
                });
                Ok(())
            }
            Err(err) => {
                let message = err.user_message();
                match &err {
                    EditorError::Config(config) => {
                        log::error!("ListEditor: missing input {}", config.input_name())
                    }
                    _ => log::error!("ListEditor: load failed: {}", message),
                }
                self.state.update(|s| s.error_message = Some(message));
                Err(err)
            }
        }
    }

    async fn fetch(&self) -> Result<Loaded, EditorError> {
        let request = self.config.fetch_request()?;
        let result = self.gateway.fetch_ordered_records(&request).await?;
        Loaded::build(result, &request.order_field_name)
    }

    async fn persist(&self) -> Result<(), EditorError> {
        let ordered_ids = self.state.read(EditorState::ordered_ids);
        let request = self.config.persist_request(ordered_ids)?;
        self.gateway.persist_order(&request).await?;
        Ok(())
    }

    // =========================================================================
    // Column resize
    // =========================================================================

    /// Starts resizing a column from the given pointer position.
    ///
    /// Replaces any active resize. Returns `Ignored` for an unknown column.
    pub fn resize_start(&self, column_index: usize, pointer_x: i32) -> EventResult {
        let start_width = self
            .state
            .read(|s| s.columns.get(column_index).map(ColumnModel::effective_width));
        let Some(start_width) = start_width else {
            log::warn!("ListEditor: resize start on unknown column {}", column_index);
            return EventResult::Ignored;
        };

        let mut interaction = self.interaction();
        // Release the previous registration before taking a new one.
        interaction.resize = None;
        let capture = CaptureGuard::acquire(Arc::clone(&self.capture));
        interaction.resize = Some(ResizeSession::new(column_index, pointer_x, start_width, capture));
        EventResult::StartDrag
    }

    /// Applies a pointer move to the active resize.
    pub fn resize_move(&self, pointer_x: i32) -> EventResult {
        let target = self
            .interaction()
            .resize
            .as_ref()
            .map(|session| (session.index, session.width_at(pointer_x)));
        let Some((index, width)) = target else {
            return EventResult::Ignored;
        };

        self.state
            .update(|s| s.columns = with_column_width(&s.columns, index, width));
        EventResult::Consumed
    }

    /// Ends the active resize and releases its listeners.
    pub fn resize_end(&self) -> EventResult {
        match self.interaction().resize.take() {
            Some(_) => EventResult::Consumed,
            None => EventResult::Ignored,
        }
    }

    /// Returns `true` while a column resize is active.
    pub fn is_resizing(&self) -> bool {
        self.interaction().resize.is_some()
    }

    // =========================================================================
    // Row drag and drop
    // =========================================================================

    /// Records the row being dragged.
    ///
    /// While the drag lasts the host advertises [`drop_effect`](Self::drop_effect).
    pub fn drag_start(&self, row_index: usize) -> EventResult {
        self.interaction().drag_source = Some(row_index);
        EventResult::StartDrag
    }

    /// Handles a hover tick over a row; always allows dropping.
    pub fn drag_over(&self) -> EventResult {
        EventResult::Consumed
    }

    /// Drops the dragged row at `target_index`.
    ///
    /// Without a recorded source, or when dropping a row onto itself, the
    /// rows are left untouched. The source tracker is cleared either way.
    pub fn drop_at(&self, target_index: usize) -> EventResult {
        let Some(source) = self.interaction().drag_source.take() else {
            log::debug!("ListEditor: drop without drag start");
            return EventResult::Consumed;
        };

        let moved = self.state.read(|s| move_row(&s.rows, source, target_index));
        if let Some(rows) = moved {
            log::debug!("ListEditor: moved row {} to {}", source, target_index);
            self.state.update(|s| s.rows = rows);
        }
        EventResult::Consumed
    }

    /// Forgets the dragged row (drag ended outside any row).
    pub fn drag_cancel(&self) {
        self.interaction().drag_source = None;
    }

    /// Returns the drop effect to advertise, or `None` when no row is being
    /// dragged.
    pub fn drop_effect(&self) -> Option<DropEffect> {
        self.interaction().drag_source.map(|_| DropEffect::Move)
    }

    /// Returns the index of the row being dragged.
    pub fn drag_source(&self) -> Option<usize> {
        self.interaction().drag_source
    }

    // =========================================================================
    // Teardown
    // =========================================================================

    /// Stops all pointer interaction and releases viewport listeners.
    ///
    /// In-flight loads and saves are not aborted.
    pub fn unmount(&self) {
        let mut interaction = self.interaction();
        interaction.resize = None;
        interaction.drag_source = None;
    }
}

impl std::fmt::Debug for ListEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListEditor")
            .field("config", &self.config)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}
