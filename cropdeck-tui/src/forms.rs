//! Create and edit forms for containers.
//!
//! Both forms run `editing -> submitting -> {closed, editing with error}`.
//! Field updates go through typed actions; nested location and settings
//! updates keep their sibling fields.

use crate::dispatch::Command;
use cropdeck_core::{
    cycle_next, Container, ContainerCreate, ContainerId, ContainerPurpose, ContainerSettings,
    ContainerStatus, ContainerType, ContainerUpdate, Location, SeedType, Tenant,
};

/// Seed varieties offered by both forms.
pub fn seed_catalog() -> Vec<SeedType> {
    vec![
        SeedType::new("1", "Lettuce", Some("Butterhead")),
        SeedType::new("2", "Lettuce", Some("Romaine")),
        SeedType::new("3", "Kale", Some("Curly")),
        SeedType::new("4", "Spinach", None),
        SeedType::new("5", "Basil", None),
        SeedType::new("6", "Cilantro", None),
    ]
}

// ============================================================================
// SHARED PIECES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Tenant,
    Type,
    Status,
    Purpose,
    SeedTypes,
    City,
    Country,
    Address,
    Notes,
    ShadowService,
    RoboticsSimulation,
    ConnectEcosystem,
    Submit,
}

impl FormField {
    pub fn label(&self) -> &'static str {
        match self {
            FormField::Name => "Container Name",
            FormField::Tenant => "Tenant",
            FormField::Type => "Container Type",
            FormField::Status => "Status",
            FormField::Purpose => "Purpose",
            FormField::SeedTypes => "Seed Types",
            FormField::City => "City",
            FormField::Country => "Country",
            FormField::Address => "Address",
            FormField::Notes => "Notes",
            FormField::ShadowService => "Enable Shadow Service",
            FormField::RoboticsSimulation => "Run Robotics Simulation",
            FormField::ConnectEcosystem => "Connect to other systems",
            FormField::Submit => "Submit",
        }
    }

    /// Fields edited by typing.
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            FormField::Name
                | FormField::City
                | FormField::Country
                | FormField::Address
                | FormField::Notes
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationField {
    City,
    Country,
    Address,
}

impl LocationField {
    fn from_form_field(field: FormField) -> Option<Self> {
        match field {
            FormField::City => Some(LocationField::City),
            FormField::Country => Some(LocationField::Country),
            FormField::Address => Some(LocationField::Address),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    ShadowService(bool),
    RoboticsSimulation(bool),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Editing,
    Submitting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    /// Saved; the owner refetches and closes the panel.
    Closed,
    /// Saved failed; the form stays open with an error banner.
    Failed,
}

/// Merge one location field, creating the location if absent.
fn merge_location(location: &mut Option<Location>, field: LocationField, value: String) {
    let mut next = location.take().unwrap_or_default();
    match field {
        LocationField::City => next.city = value,
        LocationField::Country => next.country = value,
        LocationField::Address => {
            next.address = if value.is_empty() { None } else { Some(value) }
        }
    }
    *location = Some(next);
}

fn location_value(location: &Option<Location>, field: LocationField) -> String {
    location
        .as_ref()
        .map(|l| match field {
            LocationField::City => l.city.clone(),
            LocationField::Country => l.country.clone(),
            LocationField::Address => l.address.clone().unwrap_or_default(),
        })
        .unwrap_or_default()
}

fn merge_settings(settings: &mut ContainerSettings, change: SettingsChange) {
    match change {
        SettingsChange::ShadowService(enabled) => settings.shadow_service_enabled = enabled,
        SettingsChange::RoboticsSimulation(enabled) => {
            settings.robotics_simulation_enabled = Some(enabled)
        }
    }
}

/// Add the seed if missing, remove it if present.
fn toggle_seed(seeds: &mut Vec<SeedType>, seed: SeedType) {
    if let Some(idx) = seeds.iter().position(|s| s.id == seed.id) {
        seeds.remove(idx);
    } else {
        seeds.push(seed);
    }
}

/// Step through tenant names; `current` may be empty or unknown.
fn cycle_tenant(tenants: &[Tenant], current: &str, forward: bool) -> Option<String> {
    if tenants.is_empty() {
        return None;
    }
    let len = tenants.len();
    let next = match tenants.iter().position(|t| t.name == current) {
        Some(idx) if forward => (idx + 1) % len,
        Some(idx) => (idx + len - 1) % len,
        None if forward => 0,
        None => len - 1,
    };
    Some(tenants[next].name.clone())
}

fn cycle_enum<T: Copy + PartialEq>(all: &[T], current: T, forward: bool) -> T {
    if forward {
        cycle_next(all, current)
    } else {
        let idx = all.iter().position(|v| *v == current).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }
}

/// Cursor over the focusable fields of a form.
fn step_focus(fields: &[FormField], current: FormField, forward: bool) -> FormField {
    let len = fields.len();
    match fields.iter().position(|f| *f == current) {
        Some(idx) if forward => fields[(idx + 1) % len],
        Some(idx) => fields[(idx + len - 1) % len],
        None => fields[0],
    }
}

fn error_or_fallback(message: String, fallback: &str) -> String {
    if message.trim().is_empty() {
        fallback.to_string()
    } else {
        message
    }
}

// ============================================================================
// CREATE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum CreateAction {
    SetName(String),
    SetTenant(String),
    SetType(ContainerType),
    SetPurpose(ContainerPurpose),
    ToggleSeedType(SeedType),
    SetLocation(LocationField, String),
    SetNotes(String),
    SetSettings(SettingsChange),
    SetConnectEcosystem(bool),
}

#[derive(Debug, Clone)]
pub struct CreateForm {
    pub id: u64,
    pub data: ContainerCreate,
    pub phase: FormPhase,
    pub error: Option<String>,
    /// UI-only toggle; changes the submit label, not the payload.
    pub connect_ecosystem: bool,
    pub focus: FormField,
    pub seed_cursor: usize,
}

impl CreateForm {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            data: ContainerCreate {
                settings: ContainerSettings {
                    shadow_service_enabled: false,
                    robotics_simulation_enabled: Some(false),
                    ..ContainerSettings::default()
                },
                notes: Some(String::new()),
                ..ContainerCreate::default()
            },
            phase: FormPhase::Editing,
            error: None,
            connect_ecosystem: false,
            focus: FormField::Name,
            seed_cursor: 0,
        }
    }

    pub fn apply(&mut self, action: CreateAction) {
        match action {
            CreateAction::SetName(name) => self.data.name = name,
            CreateAction::SetTenant(tenant) => self.data.tenant = tenant,
            CreateAction::SetType(container_type) => {
                self.data.container_type = container_type;
                let fields = self.visible_fields();
                if !fields.contains(&self.focus) {
                    self.focus = FormField::Type;
                }
            }
            CreateAction::SetPurpose(purpose) => self.data.purpose = purpose,
            CreateAction::ToggleSeedType(seed) => toggle_seed(&mut self.data.seed_types, seed),
            CreateAction::SetLocation(field, value) => {
                merge_location(&mut self.data.location, field, value)
            }
            CreateAction::SetNotes(notes) => self.data.notes = Some(notes),
            CreateAction::SetSettings(change) => merge_settings(&mut self.data.settings, change),
            CreateAction::SetConnectEcosystem(connect) => self.connect_ecosystem = connect,
        }
    }

    pub fn location_visible(&self) -> bool {
        self.data.container_type == ContainerType::Physical
    }

    pub fn robotics_visible(&self) -> bool {
        self.data.container_type == ContainerType::Virtual
    }

    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Name,
            FormField::Tenant,
            FormField::Type,
            FormField::Purpose,
            FormField::SeedTypes,
        ];
        if self.location_visible() {
            fields.extend([FormField::City, FormField::Country, FormField::Address]);
        }
        fields.extend([FormField::Notes, FormField::ShadowService]);
        if self.robotics_visible() {
            fields.push(FormField::RoboticsSimulation);
        }
        fields.extend([FormField::ConnectEcosystem, FormField::Submit]);
        fields
    }

    pub fn focus_next(&mut self) {
        self.focus = step_focus(&self.visible_fields(), self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step_focus(&self.visible_fields(), self.focus, false);
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && self.data.validate().is_ok()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Creating..."
        } else if self.connect_ecosystem {
            "Create and Connect"
        } else {
            "Create Container"
        }
    }

    /// The text shown for a text field.
    pub fn text_value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.data.name.clone(),
            FormField::Notes => self.data.notes.clone().unwrap_or_default(),
            other => LocationField::from_form_field(other)
                .map(|f| location_value(&self.data.location, f))
                .unwrap_or_default(),
        }
    }

    fn set_text(&mut self, field: FormField, value: String) {
        let action = match field {
            FormField::Name => CreateAction::SetName(value),
            FormField::Notes => CreateAction::SetNotes(value),
            other => match LocationField::from_form_field(other) {
                Some(location_field) => CreateAction::SetLocation(location_field, value),
                None => return,
            },
        };
        self.apply(action);
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_submitting() || !self.focus.is_text() {
            return;
        }
        let mut value = self.text_value(self.focus);
        value.push(c);
        self.set_text(self.focus, value);
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() || !self.focus.is_text() {
            return;
        }
        let mut value = self.text_value(self.focus);
        value.pop();
        self.set_text(self.focus, value);
    }

    /// Change the focused choice field, or flip the focused toggle.
    pub fn cycle(&mut self, tenants: &[Tenant], forward: bool) {
        if self.is_submitting() {
            return;
        }
        let action = match self.focus {
            FormField::Tenant => match cycle_tenant(tenants, &self.data.tenant, forward) {
                Some(name) => CreateAction::SetTenant(name),
                None => return,
            },
            FormField::Type => CreateAction::SetType(cycle_enum(
                ContainerType::all(),
                self.data.container_type,
                forward,
            )),
            FormField::Purpose => CreateAction::SetPurpose(cycle_enum(
                ContainerPurpose::all(),
                self.data.purpose,
                forward,
            )),
            FormField::SeedTypes => {
                let len = seed_catalog().len();
                self.seed_cursor = if forward {
                    (self.seed_cursor + 1) % len
                } else {
                    (self.seed_cursor + len - 1) % len
                };
                return;
            }
            _ => return self.toggle(),
        };
        self.apply(action);
    }

    pub fn toggle(&mut self) {
        if self.is_submitting() {
            return;
        }
        let action = match self.focus {
            FormField::SeedTypes => match seed_catalog().get(self.seed_cursor) {
                Some(seed) => CreateAction::ToggleSeedType(seed.clone()),
                None => return,
            },
            FormField::ShadowService => CreateAction::SetSettings(SettingsChange::ShadowService(
                !self.data.settings.shadow_service_enabled,
            )),
            FormField::RoboticsSimulation => {
                let enabled = self.data.settings.robotics_simulation_enabled.unwrap_or(false);
                CreateAction::SetSettings(SettingsChange::RoboticsSimulation(!enabled))
            }
            FormField::ConnectEcosystem => CreateAction::SetConnectEcosystem(!self.connect_ecosystem),
            _ => return,
        };
        self.apply(action);
    }

    /// Enter `submitting` and produce the request, if submission is allowed.
    pub fn begin_submit(&mut self) -> Option<Command> {
        if !self.can_submit() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        self.error = None;
        Some(Command::CreateContainer {
            form_id: self.id,
            payload: self.data.normalized(),
        })
    }

    pub fn finish(&mut self, result: Result<Container, String>) -> FormOutcome {
        self.phase = FormPhase::Editing;
        match result {
            Ok(container) => {
                tracing::info!(id = %container.id, name = %container.name, "container created");
                FormOutcome::Closed
            }
            Err(message) => {
                self.error = Some(error_or_fallback(message, "Failed to create container"));
                FormOutcome::Failed
            }
        }
    }
}

// ============================================================================
// EDIT
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum EditAction {
    SetTenant(String),
    SetPurpose(ContainerPurpose),
    SetStatus(ContainerStatus),
    ToggleSeedType(SeedType),
    SetLocation(LocationField, String),
    SetNotes(String),
    SetSettings(SettingsChange),
    SetConnectEcosystem(bool),
}

#[derive(Debug, Clone)]
pub struct EditForm {
    pub id: u64,
    pub container_id: ContainerId,
    /// Read-only.
    pub name: String,
    /// Fixed for the lifetime of the form.
    pub container_type: ContainerType,
    pub data: ContainerUpdate,
    pub phase: FormPhase,
    pub error: Option<String>,
    pub connect_ecosystem: bool,
    /// Already connected containers cannot be disconnected here.
    pub connect_locked: bool,
    pub focus: FormField,
    pub seed_cursor: usize,
}

impl EditForm {
    pub fn new(id: u64, container: &Container) -> Self {
        let connected = container.ecosystem_connected();
        Self {
            id,
            container_id: container.id.clone(),
            name: container.name.clone(),
            container_type: container.container_type,
            data: ContainerUpdate::from_container(container),
            phase: FormPhase::Editing,
            error: None,
            connect_ecosystem: connected,
            connect_locked: connected,
            focus: FormField::Tenant,
            seed_cursor: 0,
        }
    }

    pub fn apply(&mut self, action: EditAction) {
        match action {
            EditAction::SetTenant(tenant) => self.data.tenant = Some(tenant),
            EditAction::SetPurpose(purpose) => self.data.purpose = Some(purpose),
            EditAction::SetStatus(status) => self.data.status = Some(status),
            EditAction::ToggleSeedType(seed) => {
                toggle_seed(self.data.seed_types.get_or_insert_with(Vec::new), seed)
            }
            EditAction::SetLocation(field, value) => {
                merge_location(&mut self.data.location, field, value)
            }
            EditAction::SetNotes(notes) => self.data.notes = Some(notes),
            EditAction::SetSettings(change) => {
                merge_settings(self.data.settings.get_or_insert_with(Default::default), change)
            }
            EditAction::SetConnectEcosystem(connect) => {
                if !self.connect_locked {
                    self.connect_ecosystem = connect;
                }
            }
        }
    }

    pub fn location_visible(&self) -> bool {
        self.container_type == ContainerType::Physical
    }

    pub fn robotics_visible(&self) -> bool {
        self.container_type == ContainerType::Virtual
    }

    pub fn visible_fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::Tenant,
            FormField::Status,
            FormField::Purpose,
            FormField::SeedTypes,
        ];
        if self.location_visible() {
            fields.extend([FormField::City, FormField::Country, FormField::Address]);
        }
        fields.extend([FormField::Notes, FormField::ShadowService]);
        if self.robotics_visible() {
            fields.push(FormField::RoboticsSimulation);
        }
        fields.extend([FormField::ConnectEcosystem, FormField::Submit]);
        fields
    }

    pub fn focus_next(&mut self) {
        self.focus = step_focus(&self.visible_fields(), self.focus, true);
    }

    pub fn focus_prev(&mut self) {
        self.focus = step_focus(&self.visible_fields(), self.focus, false);
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.is_submitting()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Updating..."
        } else if self.connect_ecosystem {
            "Save and Connect"
        } else {
            "Save Changes"
        }
    }

    pub fn text_value(&self, field: FormField) -> String {
        match field {
            FormField::Name => self.name.clone(),
            FormField::Notes => self.data.notes.clone().unwrap_or_default(),
            other => LocationField::from_form_field(other)
                .map(|f| location_value(&self.data.location, f))
                .unwrap_or_default(),
        }
    }

    fn set_text(&mut self, field: FormField, value: String) {
        let action = match field {
            FormField::Notes => EditAction::SetNotes(value),
            other => match LocationField::from_form_field(other) {
                Some(location_field) => EditAction::SetLocation(location_field, value),
                None => return,
            },
        };
        self.apply(action);
    }

    pub fn input_char(&mut self, c: char) {
        if self.is_submitting() || !self.focus.is_text() {
            return;
        }
        let mut value = self.text_value(self.focus);
        value.push(c);
        self.set_text(self.focus, value);
    }

    pub fn backspace(&mut self) {
        if self.is_submitting() || !self.focus.is_text() {
            return;
        }
        let mut value = self.text_value(self.focus);
        value.pop();
        self.set_text(self.focus, value);
    }

    pub fn cycle(&mut self, tenants: &[Tenant], forward: bool) {
        if self.is_submitting() {
            return;
        }
        let action = match self.focus {
            FormField::Tenant => {
                let current = self.data.tenant.clone().unwrap_or_default();
                match cycle_tenant(tenants, &current, forward) {
                    Some(name) => EditAction::SetTenant(name),
                    None => return,
                }
            }
            FormField::Status => EditAction::SetStatus(cycle_enum(
                ContainerStatus::all(),
                self.data.status.unwrap_or_default(),
                forward,
            )),
            FormField::Purpose => EditAction::SetPurpose(cycle_enum(
                ContainerPurpose::all(),
                self.data.purpose.unwrap_or_default(),
                forward,
            )),
            FormField::SeedTypes => {
                let len = seed_catalog().len();
                self.seed_cursor = if forward {
                    (self.seed_cursor + 1) % len
                } else {
                    (self.seed_cursor + len - 1) % len
                };
                return;
            }
            _ => return self.toggle(),
        };
        self.apply(action);
    }

    pub fn toggle(&mut self) {
        if self.is_submitting() {
            return;
        }
        let settings = self.data.settings.clone().unwrap_or_default();
        let action = match self.focus {
            FormField::SeedTypes => match seed_catalog().get(self.seed_cursor) {
                Some(seed) => EditAction::ToggleSeedType(seed.clone()),
                None => return,
            },
            FormField::ShadowService => EditAction::SetSettings(SettingsChange::ShadowService(
                !settings.shadow_service_enabled,
            )),
            FormField::RoboticsSimulation => EditAction::SetSettings(
                SettingsChange::RoboticsSimulation(
                    !settings.robotics_simulation_enabled.unwrap_or(false),
                ),
            ),
            FormField::ConnectEcosystem => EditAction::SetConnectEcosystem(!self.connect_ecosystem),
            _ => return,
        };
        self.apply(action);
    }

    pub fn begin_submit(&mut self) -> Option<Command> {
        if !self.can_submit() {
            return None;
        }
        self.phase = FormPhase::Submitting;
        self.error = None;
        Some(Command::UpdateContainer {
            form_id: self.id,
            id: self.container_id.clone(),
            payload: self.data.clone(),
        })
    }

    pub fn finish(&mut self, result: Result<Container, String>) -> FormOutcome {
        self.phase = FormPhase::Editing;
        match result {
            Ok(container) => {
                tracing::info!(id = %container.id, "container updated");
                FormOutcome::Closed
            }
            Err(message) => {
                self.error = Some(error_or_fallback(message, "Failed to update container"));
                FormOutcome::Failed
            }
        }
    }
}

// ============================================================================
// PANEL
// ============================================================================

/// The form panel currently open, if any.
#[derive(Debug, Clone)]
pub enum FormPanel {
    Create(CreateForm),
    Edit(EditForm),
}

impl FormPanel {
    pub fn id(&self) -> u64 {
        match self {
            FormPanel::Create(form) => form.id,
            FormPanel::Edit(form) => form.id,
        }
    }

    pub fn focus(&self) -> FormField {
        match self {
            FormPanel::Create(form) => form.focus,
            FormPanel::Edit(form) => form.focus,
        }
    }

    pub fn focus_next(&mut self) {
        match self {
            FormPanel::Create(form) => form.focus_next(),
            FormPanel::Edit(form) => form.focus_next(),
        }
    }

    pub fn focus_prev(&mut self) {
        match self {
            FormPanel::Create(form) => form.focus_prev(),
            FormPanel::Edit(form) => form.focus_prev(),
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self {
            FormPanel::Create(form) => form.input_char(c),
            FormPanel::Edit(form) => form.input_char(c),
        }
    }

    pub fn backspace(&mut self) {
        match self {
            FormPanel::Create(form) => form.backspace(),
            FormPanel::Edit(form) => form.backspace(),
        }
    }

    pub fn cycle(&mut self, tenants: &[Tenant], forward: bool) {
        match self {
            FormPanel::Create(form) => form.cycle(tenants, forward),
            FormPanel::Edit(form) => form.cycle(tenants, forward),
        }
    }

    pub fn toggle(&mut self) {
        match self {
            FormPanel::Create(form) => form.toggle(),
            FormPanel::Edit(form) => form.toggle(),
        }
    }

    pub fn begin_submit(&mut self) -> Option<Command> {
        match self {
            FormPanel::Create(form) => form.begin_submit(),
            FormPanel::Edit(form) => form.begin_submit(),
        }
    }

    pub fn finish(&mut self, result: Result<Container, String>) -> FormOutcome {
        match self {
            FormPanel::Create(form) => form.finish(result),
            FormPanel::Edit(form) => form.finish(result),
        }
    }
}
