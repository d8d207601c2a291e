//! Application state and view state definitions.
//!
//! `App` is pure state: key actions and fetch results update it and return the
//! `Command`s that should run next. Nothing here performs I/O.

use crate::config::DashboardConfig;
use crate::dispatch::{Command, FetchResult, SubmitResult};
use crate::forms::{CreateForm, EditForm, FormField, FormOutcome, FormPanel};
use crate::keys::{Action, InputMode};
use crate::nav::{Focus, Screen};
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::query::{ContainerQuery, ContainersQuery, PerformanceQuery, TenantsQuery};
use crate::theme::GreenhouseTheme;
use cropdeck_core::{
    cycle_next, Container, ContainerFilters, ContainerPurpose, ContainerStatus, ContainerType,
    FilterChange, Pagination, Tenant, TimeRange, DEFAULT_ROWS_PER_PAGE, ROWS_PER_PAGE_OPTIONS,
};

const NOTIFICATION_MAX_AGE_SECS: i64 = 5;

pub struct App {
    pub config: DashboardConfig,
    pub theme: GreenhouseTheme,
    pub screen: Screen,
    pub focus: Focus,

    pub containers: ContainersQuery,
    pub metrics: PerformanceQuery,
    pub tenants: TenantsQuery,

    pub filter_section: FilterSection,
    pub performance: PerformanceOverview,
    pub list: ContainerListView,
    pub detail: Option<DetailView>,
    pub form: Option<FormPanel>,
    next_form_id: u64,
    detail_generation: u64,

    pub notifications: Vec<Notification>,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        let list = ContainerListView::new(config.default_rows_per_page);
        Self {
            config,
            theme: GreenhouseTheme::greenhouse(),
            screen: Screen::Dashboard,
            focus: Focus::default(),
            containers: ContainersQuery::default(),
            metrics: PerformanceQuery::new(),
            tenants: TenantsQuery::new(),
            filter_section: FilterSection::default(),
            performance: PerformanceOverview::default(),
            list,
            detail: None,
            form: None,
            next_form_id: 1,
            detail_generation: 0,
            notifications: Vec::new(),
            should_quit: false,
        }
    }

    /// Apply saved preferences. Call before `mount`.
    pub fn restore(&mut self, state: PersistedState) {
        self.metrics = PerformanceQuery::with_type_filter(state.filters.container_type);
        self.containers = ContainersQuery::new(state.filters);
        let rows = if ROWS_PER_PAGE_OPTIONS.contains(&state.rows_per_page) {
            state.rows_per_page
        } else {
            tracing::warn!(rows = state.rows_per_page, "ignoring saved rows per page");
            DEFAULT_ROWS_PER_PAGE
        };
        self.list.pagination.set_rows_per_page(rows);
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            filters: self.containers.filters().clone(),
            rows_per_page: self.list.pagination.rows_per_page,
        }
    }

    /// Initial fetches for the dashboard.
    pub fn mount(&mut self) -> Vec<Command> {
        vec![
            self.containers.refetch(),
            self.metrics.refetch(),
            self.tenants.refetch(),
        ]
    }

    pub fn input_mode(&self) -> InputMode {
        if let Some(form) = &self.form {
            return if form.focus().is_text() {
                InputMode::Text
            } else {
                InputMode::Normal
            };
        }
        if self.screen == Screen::Dashboard
            && self.focus == Focus::Filters
            && self.filter_section.editing
        {
            return InputMode::Text;
        }
        InputMode::Normal
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
    }

    /// Most recent notification still worth showing.
    pub fn current_notification(&self) -> Option<&Notification> {
        let now = chrono::Utc::now();
        self.notifications
            .last()
            .filter(|n| n.is_fresh(now, NOTIFICATION_MAX_AGE_SECS))
    }

    pub fn on_tick(&mut self) {
        let now = chrono::Utc::now();
        self.notifications
            .retain(|n| n.is_fresh(now, NOTIFICATION_MAX_AGE_SECS));
    }

    // ------------------------------------------------------------------------
    // Actions
    // ------------------------------------------------------------------------

    pub fn handle_action(&mut self, action: Action) -> Vec<Command> {
        if self.form.is_some() {
            return self.handle_form_action(action);
        }
        match self.screen {
            Screen::Dashboard => self.handle_dashboard_action(action),
            Screen::Detail => self.handle_detail_action(action),
        }
    }

    fn handle_form_action(&mut self, action: Action) -> Vec<Command> {
        let tenants = self.tenants.tenants().to_vec();
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match action {
            Action::Cancel | Action::Quit => {
                self.form = None;
                return Vec::new();
            }
            Action::FocusNext | Action::MoveDown => form.focus_next(),
            Action::FocusPrev | Action::MoveUp => form.focus_prev(),
            Action::MoveLeft => form.cycle(&tenants, false),
            Action::MoveRight => form.cycle(&tenants, true),
            Action::Select => form.toggle(),
            Action::Input(c) => form.input_char(c),
            Action::Backspace => form.backspace(),
            Action::Submit => return self.submit_form(),
            Action::Confirm => match form.focus() {
                FormField::Submit => return self.submit_form(),
                FormField::SeedTypes => form.toggle(),
                field if field.is_text() => form.focus_next(),
                _ => form.cycle(&tenants, true),
            },
            _ => {}
        }
        Vec::new()
    }

    fn submit_form(&mut self) -> Vec<Command> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match form.begin_submit() {
            Some(command) => vec![command],
            None => {
                if matches!(form, FormPanel::Create(f) if !f.is_submitting()) {
                    self.notify(NotificationLevel::Warning, "Name and tenant are required");
                }
                Vec::new()
            }
        }
    }

    fn handle_dashboard_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Vec::new()
            }
            Action::FocusNext => {
                self.filter_section.editing = false;
                self.focus = self.focus.next();
                Vec::new()
            }
            Action::FocusPrev => {
                self.filter_section.editing = false;
                self.focus = self.focus.previous();
                Vec::new()
            }
            Action::Refresh => vec![
                self.containers.refetch(),
                self.metrics.refetch(),
                self.tenants.refetch(),
            ],
            Action::NewItem => self.open_create_form(),
            Action::ClearFilters => {
                let cleared = self.containers.filters().cleared();
                self.set_filters(cleared)
            }
            Action::OpenSearch => {
                self.focus = Focus::Filters;
                self.filter_section.field = FilterField::Search;
                self.filter_section.editing = true;
                Vec::new()
            }
            Action::CycleTimeRange => {
                let next = cycle_next(TimeRange::all(), self.metrics.time_range());
                self.metrics.set_time_range(next).into_iter().collect()
            }
            _ => match self.focus {
                Focus::Filters => self.handle_filters_action(action),
                Focus::Performance => self.handle_performance_action(action),
                Focus::List => self.handle_list_action(action),
            },
        }
    }

    fn handle_filters_action(&mut self, action: Action) -> Vec<Command> {
        let filters = self.containers.filters().clone();
        if self.filter_section.editing {
            let change = match action {
                Action::Input(c) => {
                    let mut search = filters.search.clone();
                    search.push(c);
                    FilterChange::Search(search)
                }
                Action::Backspace => {
                    let mut search = filters.search.clone();
                    search.pop();
                    FilterChange::Search(search)
                }
                Action::Confirm | Action::Cancel => {
                    self.filter_section.editing = false;
                    return Vec::new();
                }
                _ => return Vec::new(),
            };
            return self.set_filters(filters.apply(change));
        }

        match action {
            Action::MoveUp => self.filter_section.field = self.filter_section.field.previous(),
            Action::MoveDown => self.filter_section.field = self.filter_section.field.next(),
            Action::MoveLeft | Action::MoveRight | Action::Select | Action::Confirm => {
                if self.filter_section.field == FilterField::Search {
                    self.filter_section.editing = true;
                    return Vec::new();
                }
                let forward = action != Action::MoveLeft;
                if let Some(change) =
                    self.filter_section
                        .step(&filters, self.tenants.tenants(), forward)
                {
                    return self.set_filters(filters.apply(change));
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_performance_action(&mut self, action: Action) -> Vec<Command> {
        match action {
            Action::MoveLeft | Action::MoveRight | Action::MoveUp | Action::MoveDown => {
                self.performance.cursor = cycle_next(ContainerType::all(), self.performance.cursor);
                Vec::new()
            }
            Action::Select | Action::Confirm => self.select_performance_type(self.performance.cursor),
            _ => Vec::new(),
        }
    }

    /// Picking the selected type again clears the selection. The selection
    /// drives both the metrics query and the list's type filter.
    pub fn select_performance_type(&mut self, picked: ContainerType) -> Vec<Command> {
        let next = PerformanceOverview::toggled(self.metrics.type_filter(), picked);
        let mut commands: Vec<Command> = self.metrics.set_type_filter(next).into_iter().collect();
        let filters = self.containers.filters().apply(FilterChange::Type(next));
        commands.extend(self.set_filters(filters));
        commands
    }

    fn handle_list_action(&mut self, action: Action) -> Vec<Command> {
        let containers = self.containers.containers();
        if let Some(menu) = self.list.menu.as_mut() {
            match action {
                Action::MoveUp => menu.move_up(),
                Action::MoveDown => menu.move_down(),
                Action::Cancel | Action::OpenMenu => self.list.menu = None,
                Action::Confirm | Action::Select => {
                    if let Some(record) = self.list.activate_menu() {
                        return self.open_edit_form(&record);
                    }
                }
                _ => {}
            }
            return Vec::new();
        }

        let len = containers.len();
        match action {
            Action::MoveUp => self.list.move_up(),
            Action::MoveDown => self.list.move_down(len),
            Action::NextPage => self.list.next_page(len),
            Action::PrevPage => self.list.prev_page(),
            Action::CycleRowsPerPage => self.list.cycle_rows_per_page(),
            Action::OpenMenu => self.list.open_menu(containers),
            Action::EditItem => {
                if let Some(record) = self.list.selected(containers).cloned() {
                    return self.open_edit_form(&record);
                }
            }
            Action::Confirm => {
                if let Some(id) = self.list.selected(containers).map(|c| c.id.clone()) {
                    return self.open_detail(id);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_detail_action(&mut self, action: Action) -> Vec<Command> {
        let Some(detail) = self.detail.as_mut() else {
            self.screen = Screen::Dashboard;
            return Vec::new();
        };
        match action {
            Action::Quit => self.should_quit = true,
            Action::Cancel => self.close_detail(),
            Action::FocusNext | Action::MoveRight => detail.tab = detail.tab.next(),
            Action::FocusPrev | Action::MoveLeft => detail.tab = detail.tab.previous(),
            Action::Refresh => return vec![detail.query.refetch()],
            Action::EditItem => {
                if let Some(record) = detail.query.container().cloned() {
                    return self.open_edit_form(&record);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    // ------------------------------------------------------------------------
    // Transitions
    // ------------------------------------------------------------------------

    pub fn set_filters(&mut self, filters: ContainerFilters) -> Vec<Command> {
        self.containers.set_filters(filters).into_iter().collect()
    }

    /// Show one container. Ticket numbering carries over from the previous
    /// detail view so a late response for it cannot settle this one.
    pub fn open_detail(&mut self, id: String) -> Vec<Command> {
        let generation = self
            .detail
            .as_ref()
            .map_or(self.detail_generation, |d| d.query.generation());
        let mut detail = DetailView::resuming(id, generation);
        let command = detail.query.refetch();
        self.detail = Some(detail);
        self.screen = Screen::Detail;
        vec![command]
    }

    pub fn close_detail(&mut self) {
        if let Some(detail) = self.detail.take() {
            self.detail_generation = detail.query.generation();
        }
        self.screen = Screen::Dashboard;
    }

    fn take_form_id(&mut self) -> u64 {
        let id = self.next_form_id;
        self.next_form_id += 1;
        id
    }

    /// Open the create panel. Tenants are refetched so a failed load at
    /// mount can recover.
    pub fn open_create_form(&mut self) -> Vec<Command> {
        let id = self.take_form_id();
        self.form = Some(FormPanel::Create(CreateForm::new(id)));
        vec![self.tenants.refetch()]
    }

    pub fn open_edit_form(&mut self, container: &Container) -> Vec<Command> {
        let id = self.take_form_id();
        self.form = Some(FormPanel::Edit(EditForm::new(id, container)));
        vec![self.tenants.refetch()]
    }

    // ------------------------------------------------------------------------
    // Results
    // ------------------------------------------------------------------------

    pub fn handle_fetch(&mut self, result: FetchResult) {
        match result {
            FetchResult::Containers { ticket, result } => {
                if self.containers.resolve(ticket, result) {
                    let len = self.containers.containers().len();
                    self.list.clamp(len);
                }
            }
            FetchResult::Metrics { ticket, result } => {
                let failed = result.as_ref().err().cloned();
                if self.metrics.resolve(ticket, result) {
                    if let Some(message) = failed {
                        self.notify(NotificationLevel::Warning, message);
                    }
                }
            }
            FetchResult::Tenants { ticket, result } => {
                let failed = result.as_ref().err().cloned();
                if self.tenants.resolve(ticket, result) {
                    if let Some(message) = failed {
                        self.notify(NotificationLevel::Warning, message);
                    }
                }
            }
            FetchResult::Container { ticket, id, result } => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.query.resolve(&id, ticket, result);
                }
            }
        }
    }

    /// Route a submission outcome to the open form. On success the list is
    /// refetched first and the panel closed after.
    pub fn handle_submit(&mut self, result: SubmitResult) -> Vec<Command> {
        let (form_id, result) = match result {
            SubmitResult::Created { form_id, result } => (form_id, result),
            SubmitResult::Updated { form_id, result } => (form_id, result),
        };
        let Some(form) = self.form.as_mut() else {
            tracing::debug!(form_id, "submission finished after its form closed");
            return Vec::new();
        };
        if form.id() != form_id {
            tracing::debug!(form_id, open = form.id(), "submission for a replaced form");
            return Vec::new();
        }

        let saved_id = result.as_ref().ok().map(|c| c.id.clone());
        let created = matches!(form, FormPanel::Create(_));
        match form.finish(result) {
            FormOutcome::Failed => Vec::new(),
            FormOutcome::Closed => {
                let mut commands = vec![self.containers.refetch(), self.metrics.refetch()];
                if let (Some(detail), Some(saved_id)) = (self.detail.as_mut(), saved_id) {
                    if detail.query.id() == saved_id {
                        commands.push(detail.query.refetch());
                    }
                }
                self.form = None;
                let message = if created {
                    "Container created"
                } else {
                    "Container updated"
                };
                self.notify(NotificationLevel::Success, message);
                commands
            }
        }
    }
}

// ============================================================================
// FILTER SECTION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    Search,
    Type,
    Tenant,
    Purpose,
    Status,
    HasAlerts,
}

impl FilterField {
    pub fn all() -> &'static [FilterField] {
        &[
            FilterField::Search,
            FilterField::Type,
            FilterField::Tenant,
            FilterField::Purpose,
            FilterField::Status,
            FilterField::HasAlerts,
        ]
    }

    pub fn label(&self) -> &'static str {
        match self {
            FilterField::Search => "Search",
            FilterField::Type => "Type",
            FilterField::Tenant => "Tenant",
            FilterField::Purpose => "Purpose",
            FilterField::Status => "Status",
            FilterField::HasAlerts => "Has Alerts",
        }
    }

    pub fn next(&self) -> FilterField {
        cycle_next(Self::all(), *self)
    }

    pub fn previous(&self) -> FilterField {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }

    /// Display value of this field for the given filters.
    pub fn value(&self, filters: &ContainerFilters) -> String {
        fn or_all(value: Option<&str>) -> String {
            value.unwrap_or("All").to_string()
        }
        match self {
            FilterField::Search => filters.search.clone(),
            FilterField::Type => or_all(filters.container_type.as_ref().map(|t| t.label())),
            FilterField::Tenant => {
                if filters.tenant.is_empty() {
                    "All".to_string()
                } else {
                    filters.tenant.clone()
                }
            }
            FilterField::Purpose => or_all(filters.purpose.as_ref().map(|p| p.label())),
            FilterField::Status => or_all(filters.status.as_ref().map(|s| s.label())),
            FilterField::HasAlerts => if filters.has_alerts { "Yes" } else { "No" }.to_string(),
        }
    }
}

/// Focus and edit state of the search/filter section. The filters themselves
/// are owned by the containers query.
#[derive(Debug, Clone, Default)]
pub struct FilterSection {
    pub field: FilterField,
    pub editing: bool,
}

impl FilterSection {
    /// The change produced by stepping the focused choice field.
    pub fn step(
        &self,
        filters: &ContainerFilters,
        tenants: &[Tenant],
        forward: bool,
    ) -> Option<FilterChange> {
        match self.field {
            FilterField::Search => None,
            FilterField::Type => Some(FilterChange::Type(step_optional(
                ContainerType::all(),
                filters.container_type,
                forward,
            ))),
            FilterField::Purpose => Some(FilterChange::Purpose(step_optional(
                ContainerPurpose::all(),
                filters.purpose,
                forward,
            ))),
            FilterField::Status => Some(FilterChange::Status(step_optional(
                ContainerStatus::all(),
                filters.status,
                forward,
            ))),
            FilterField::Tenant => {
                let names: Vec<&str> = tenants.iter().map(|t| t.name.as_str()).collect();
                let current = names.iter().copied().find(|n| *n == filters.tenant);
                let next = step_optional(&names, current, forward);
                Some(FilterChange::Tenant(next.unwrap_or_default().to_string()))
            }
            FilterField::HasAlerts => Some(FilterChange::HasAlerts(!filters.has_alerts)),
        }
    }
}

/// Step through `None, all[0], .., all[n-1]` and wrap.
fn step_optional<T: Copy + PartialEq>(all: &[T], current: Option<T>, forward: bool) -> Option<T> {
    let len = all.len() + 1;
    let idx = match current {
        None => 0,
        Some(value) => all.iter().position(|v| *v == value).map_or(0, |i| i + 1),
    };
    let next = if forward {
        (idx + 1) % len
    } else {
        (idx + len - 1) % len
    };
    if next == 0 {
        None
    } else {
        Some(all[next - 1])
    }
}

// ============================================================================
// PERFORMANCE OVERVIEW
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PerformanceOverview {
    /// Card under the cursor.
    pub cursor: ContainerType,
}

impl PerformanceOverview {
    pub fn toggled(current: Option<ContainerType>, picked: ContainerType) -> Option<ContainerType> {
        if current == Some(picked) {
            None
        } else {
            Some(picked)
        }
    }
}

// ============================================================================
// CONTAINER LIST
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    Edit,
    View,
    Shutdown,
}

impl RowAction {
    pub fn all() -> &'static [RowAction] {
        &[RowAction::Edit, RowAction::View, RowAction::Shutdown]
    }

    pub fn label(&self) -> &'static str {
        match self {
            RowAction::Edit => "Edit",
            RowAction::View => "View",
            RowAction::Shutdown => "Shutdown",
        }
    }
}

/// Per-row action menu, bound to the row it was opened on.
#[derive(Debug, Clone)]
pub struct RowMenu {
    pub row: Container,
    pub cursor: usize,
}

impl RowMenu {
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < RowAction::all().len() {
            self.cursor += 1;
        }
    }

    pub fn action(&self) -> RowAction {
        RowAction::all()
            .get(self.cursor)
            .copied()
            .unwrap_or(RowAction::Edit)
    }
}

/// What the list area shows. Loading wins over error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListDisplay {
    Loading,
    Error(String),
    Table,
}

impl ListDisplay {
    pub fn of(loading: bool, error: Option<&str>) -> ListDisplay {
        if loading {
            ListDisplay::Loading
        } else if let Some(message) = error {
            ListDisplay::Error(message.to_string())
        } else {
            ListDisplay::Table
        }
    }
}

#[derive(Debug, Clone)]
pub struct ContainerListView {
    pub pagination: Pagination,
    /// Row index within the current page.
    pub cursor: usize,
    pub menu: Option<RowMenu>,
}

impl ContainerListView {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            pagination: Pagination::new(rows_per_page),
            cursor: 0,
            menu: None,
        }
    }

    pub fn display(query: &ContainersQuery) -> ListDisplay {
        ListDisplay::of(query.loading(), query.error())
    }

    pub fn visible<'a>(&self, containers: &'a [Container]) -> &'a [Container] {
        self.pagination.slice(containers)
    }

    pub fn selected<'a>(&self, containers: &'a [Container]) -> Option<&'a Container> {
        self.visible(containers).get(self.cursor)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self, len: usize) {
        let rows = self.pagination.range(len).len();
        if self.cursor + 1 < rows {
            self.cursor += 1;
        }
    }

    pub fn next_page(&mut self, len: usize) {
        let before = self.pagination.page;
        self.pagination.next_page(len);
        if self.pagination.page != before {
            self.cursor = 0;
        }
    }

    pub fn prev_page(&mut self) {
        let before = self.pagination.page;
        self.pagination.prev_page();
        if self.pagination.page != before {
            self.cursor = 0;
        }
    }

    pub fn cycle_rows_per_page(&mut self) {
        self.pagination.cycle_rows_per_page();
        self.cursor = 0;
    }

    pub fn open_menu(&mut self, containers: &[Container]) {
        if let Some(row) = self.selected(containers) {
            self.menu = Some(RowMenu {
                row: row.clone(),
                cursor: 0,
            });
        }
    }

    /// Close the menu and return the record to edit when `Edit` was chosen.
    /// `View` and `Shutdown` do nothing.
    pub fn activate_menu(&mut self) -> Option<Container> {
        let menu = self.menu.take()?;
        match menu.action() {
            RowAction::Edit => Some(menu.row),
            RowAction::View | RowAction::Shutdown => None,
        }
    }

    /// Keep page and cursor inside a result set of `len` rows.
    pub fn clamp(&mut self, len: usize) {
        self.pagination.clamp(len);
        let rows = self.pagination.range(len).len();
        if rows == 0 {
            self.cursor = 0;
        } else if self.cursor >= rows {
            self.cursor = rows - 1;
        }
    }
}

// ============================================================================
// DETAIL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetailTab {
    #[default]
    Overview,
    Environment,
    Inventory,
    Devices,
}

impl DetailTab {
    pub fn all() -> &'static [DetailTab] {
        &[
            DetailTab::Overview,
            DetailTab::Environment,
            DetailTab::Inventory,
            DetailTab::Devices,
        ]
    }

    pub fn title(&self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Environment => "Environment",
            DetailTab::Inventory => "Inventory",
            DetailTab::Devices => "Devices",
        }
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|t| t == self).unwrap_or(0)
    }

    pub fn next(&self) -> DetailTab {
        cycle_next(Self::all(), *self)
    }

    pub fn previous(&self) -> DetailTab {
        let all = Self::all();
        all[(self.index() + all.len() - 1) % all.len()]
    }
}

#[derive(Debug, Clone)]
pub struct DetailView {
    pub query: ContainerQuery,
    pub tab: DetailTab,
}

impl DetailView {
    pub fn new(id: impl Into<String>) -> Self {
        Self::resuming(id, 0)
    }

    pub fn resuming(id: impl Into<String>, generation: u64) -> Self {
        Self {
            query: ContainerQuery::resuming(id, generation),
            tab: DetailTab::default(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::FetchTicket;
    use cropdeck_test_utils::{container_named, list_response, metrics_fixture, tenants};

    fn app() -> App {
        App::new(DashboardConfig::default())
    }

    fn containers_ticket(commands: &[Command]) -> FetchTicket {
        commands
            .iter()
            .find_map(|c| match c {
                Command::FetchContainers { ticket, .. } => Some(*ticket),
                _ => None,
            })
            .expect("containers fetch")
    }

    fn loaded_app(names: &[&str]) -> App {
        let mut app = app();
        let commands = app.mount();
        let ticket = containers_ticket(&commands);
        let rows = names.iter().map(|n| container_named(n)).collect();
        app.handle_fetch(FetchResult::Containers {
            ticket,
            result: Ok(list_response(rows)),
        });
        app
    }

    #[test]
    fn test_mount_fetches_everything() {
        let mut app = app();
        let names: Vec<&str> = app.mount().iter().map(Command::name).collect();
        assert_eq!(names, vec!["fetch_containers", "fetch_metrics", "fetch_tenants"]);
        assert!(app.containers.loading());
    }

    #[test]
    fn test_list_display_precedence() {
        assert_eq!(ListDisplay::of(true, Some("x")), ListDisplay::Loading);
        assert_eq!(
            ListDisplay::of(false, Some("x")),
            ListDisplay::Error("x".to_string())
        );
        assert_eq!(ListDisplay::of(false, None), ListDisplay::Table);
    }

    #[test]
    fn test_filter_step_through_choices() {
        let section = FilterSection {
            field: FilterField::Type,
            editing: false,
        };
        let filters = ContainerFilters::default();
        let change = section.step(&filters, &[], true).unwrap();
        assert_eq!(change, FilterChange::Type(Some(ContainerType::Physical)));
        let back = section.step(&filters, &[], false).unwrap();
        assert_eq!(back, FilterChange::Type(Some(ContainerType::Virtual)));
    }

    #[test]
    fn test_tenant_filter_cycles_through_none() {
        let section = FilterSection {
            field: FilterField::Tenant,
            editing: false,
        };
        let tenants = tenants(&["Acme", "Globex"]);
        let filters = ContainerFilters::default().apply(FilterChange::Tenant("Globex".into()));
        assert_eq!(
            section.step(&filters, &tenants, true),
            Some(FilterChange::Tenant(String::new()))
        );
    }

    #[test]
    fn test_search_typing_refetches_each_key() {
        let mut app = loaded_app(&["a"]);
        app.handle_action(Action::OpenSearch);
        assert_eq!(app.input_mode(), InputMode::Text);
        let commands = app.handle_action(Action::Input('b'));
        assert_eq!(commands.len(), 1);
        assert_eq!(app.containers.filters().search, "b");
        app.handle_action(Action::Confirm);
        assert_eq!(app.input_mode(), InputMode::Normal);
    }

    #[test]
    fn test_clear_filters_only_fetches_when_changed() {
        let mut app = loaded_app(&["a"]);
        assert!(app.handle_action(Action::ClearFilters).is_empty());
        app.set_filters(ContainerFilters::default().apply(FilterChange::HasAlerts(true)));
        assert_eq!(app.handle_action(Action::ClearFilters).len(), 1);
        assert!(app.containers.filters().is_empty());
    }

    #[test]
    fn test_performance_toggle_sets_and_clears_type() {
        let mut app = loaded_app(&["a"]);
        let commands = app.select_performance_type(ContainerType::Virtual);
        assert_eq!(commands.len(), 2);
        assert_eq!(app.metrics.type_filter(), Some(ContainerType::Virtual));
        assert_eq!(
            app.containers.filters().container_type,
            Some(ContainerType::Virtual)
        );

        app.select_performance_type(ContainerType::Virtual);
        assert_eq!(app.metrics.type_filter(), None);
        assert_eq!(app.containers.filters().container_type, None);
    }

    #[test]
    fn test_time_range_cycles_and_refetches() {
        let mut app = loaded_app(&["a"]);
        let commands = app.handle_action(Action::CycleTimeRange);
        assert_eq!(app.metrics.time_range(), TimeRange::Month);
        assert!(matches!(commands.as_slice(), [Command::FetchMetrics { .. }]));
    }

    #[test]
    fn test_rows_per_page_resets_page() {
        let names: Vec<String> = (0..30).map(|i| format!("Bay {}", i)).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let mut app = loaded_app(&refs);
        app.handle_action(Action::NextPage);
        assert_eq!(app.list.pagination.page, 1);
        app.handle_action(Action::CycleRowsPerPage);
        assert_eq!(app.list.pagination.page, 0);
        assert_eq!(app.list.pagination.rows_per_page, 25);
    }

    #[test]
    fn test_row_menu_edit_opens_form_with_record() {
        let mut app = loaded_app(&["Bay 1", "Bay 2"]);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::OpenMenu);
        assert_eq!(app.list.menu.as_ref().unwrap().row.name, "Bay 2");
        let commands = app.handle_action(Action::Confirm);
        assert!(matches!(commands.as_slice(), [Command::FetchTenants { .. }]));
        match &app.form {
            Some(FormPanel::Edit(form)) => assert_eq!(form.name, "Bay 2"),
            _ => panic!("edit form not opened"),
        }
    }

    #[test]
    fn test_row_menu_view_and_shutdown_are_inert() {
        let mut app = loaded_app(&["Bay 1"]);
        app.handle_action(Action::OpenMenu);
        app.handle_action(Action::MoveDown);
        app.handle_action(Action::MoveDown);
        assert_eq!(app.list.menu.as_ref().unwrap().action(), RowAction::Shutdown);
        let commands = app.handle_action(Action::Confirm);
        assert!(commands.is_empty());
        assert!(app.list.menu.is_none());
        assert!(app.form.is_none());
    }

    #[test]
    fn test_enter_opens_detail_and_escape_returns() {
        let mut app = loaded_app(&["Bay 1"]);
        let commands = app.handle_action(Action::Confirm);
        assert!(matches!(commands.as_slice(), [Command::FetchContainer { .. }]));
        assert_eq!(app.screen, Screen::Detail);
        app.handle_action(Action::FocusNext);
        assert_eq!(app.detail.as_ref().unwrap().tab, DetailTab::Environment);
        app.handle_action(Action::Cancel);
        assert_eq!(app.screen, Screen::Dashboard);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_stale_metrics_error_is_silent() {
        let mut app = app();
        let first = match app.metrics.refetch() {
            Command::FetchMetrics { ticket, .. } => ticket,
            _ => unreachable!(),
        };
        let second = match app.metrics.refetch() {
            Command::FetchMetrics { ticket, .. } => ticket,
            _ => unreachable!(),
        };
        app.handle_fetch(FetchResult::Metrics {
            ticket: second,
            result: Ok(metrics_fixture()),
        });
        app.handle_fetch(FetchResult::Metrics {
            ticket: first,
            result: Err("late".to_string()),
        });
        assert!(app.notifications.is_empty());
        assert!(app.metrics.metrics().is_some());
    }

    #[test]
    fn test_create_success_refetches_then_closes() {
        let mut app = loaded_app(&[]);
        app.handle_action(Action::NewItem);
        for c in "Bay 3".chars() {
            app.handle_action(Action::Input(c));
        }
        let form_id = app.form.as_ref().unwrap().id();
        if let Some(FormPanel::Create(form)) = app.form.as_mut() {
            form.apply(crate::forms::CreateAction::SetTenant("Acme".to_string()));
        }
        let commands = app.handle_action(Action::Submit);
        assert!(matches!(commands.as_slice(), [Command::CreateContainer { .. }]));

        let commands = app.handle_submit(SubmitResult::Created {
            form_id,
            result: Ok(container_named("Bay 3")),
        });
        assert_eq!(commands[0].name(), "fetch_containers");
        assert!(app.form.is_none());
        assert!(app.containers.loading());
    }

    #[test]
    fn test_submit_for_replaced_form_is_ignored() {
        let mut app = loaded_app(&[]);
        app.handle_action(Action::NewItem);
        let old_id = app.form.as_ref().unwrap().id();
        app.handle_action(Action::Cancel);
        app.handle_action(Action::NewItem);
        let commands = app.handle_submit(SubmitResult::Created {
            form_id: old_id,
            result: Ok(container_named("Bay 3")),
        });
        assert!(commands.is_empty());
        assert!(app.form.is_some());
    }

    #[test]
    fn test_restore_and_persist() {
        let mut app = app();
        let filters = ContainerFilters::default()
            .apply(FilterChange::Type(Some(ContainerType::Physical)))
            .apply(FilterChange::Search("bay".into()));
        app.restore(PersistedState {
            filters: filters.clone(),
            rows_per_page: 50,
        });
        assert_eq!(app.metrics.type_filter(), Some(ContainerType::Physical));
        let state = app.persisted_state();
        assert_eq!(state.filters, filters);
        assert_eq!(state.rows_per_page, 50);
    }

    #[test]
    fn test_restore_snaps_unknown_rows_per_page() {
        let mut app = app();
        app.restore(PersistedState {
            filters: ContainerFilters::default(),
            rows_per_page: 7,
        });
        assert_eq!(app.list.pagination.rows_per_page, DEFAULT_ROWS_PER_PAGE);
        app.restore(PersistedState {
            filters: ContainerFilters::default(),
            rows_per_page: 25,
        });
        assert_eq!(app.list.pagination.rows_per_page, 25);
    }

    #[test]
    fn test_late_detail_response_does_not_land_on_next_container() {
        let mut app = loaded_app(&["Bay 1", "Bay 2"]);
        let first = match app.open_detail("a".to_string()).as_slice() {
            [Command::FetchContainer { ticket, .. }] => *ticket,
            other => panic!("unexpected commands: {other:?}"),
        };
        app.close_detail();
        let second = match app.open_detail("b".to_string()).as_slice() {
            [Command::FetchContainer { ticket, .. }] => *ticket,
            other => panic!("unexpected commands: {other:?}"),
        };
        assert_ne!(first, second);

        app.handle_fetch(FetchResult::Container {
            ticket: first,
            id: "a".to_string(),
            result: Ok(container_named("Bay 1")),
        });
        let detail = app.detail.as_ref().unwrap();
        assert!(detail.query.container().is_none());
        assert!(detail.query.loading());

        app.handle_fetch(FetchResult::Container {
            ticket: second,
            id: "b".to_string(),
            result: Ok(container_named("Bay 2")),
        });
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.query.container().unwrap().name, "Bay 2");
    }

    #[test]
    fn test_forms_and_refresh_refetch_tenants() {
        let mut app = loaded_app(&[]);
        let names: Vec<&str> = app
            .handle_action(Action::Refresh)
            .iter()
            .map(Command::name)
            .collect();
        assert_eq!(names, vec!["fetch_containers", "fetch_metrics", "fetch_tenants"]);
        let commands = app.handle_action(Action::NewItem);
        assert!(matches!(commands.as_slice(), [Command::FetchTenants { .. }]));
        assert!(matches!(app.form, Some(FormPanel::Create(_))));
    }
}
