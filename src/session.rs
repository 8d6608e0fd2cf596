use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    command::Command,
    errors,
    estimate::{self, Projection},
    format::DEFAULT_DECIMALS,
    schema::{ColumnSpec, SchemaSpec},
    timing::{ActivityWindow, TimeOfDay},
};

pub const DEFAULT_INTERVAL: &str = "00:01:00";

/// The editable inputs of an estimate.
///
/// Numbers are clamped here before they reach the engine, and the interval is kept
/// as typed so that an invalid value can be shown next to a zeroed projection.
#[derive(Debug, Clone, PartialEq)]
pub struct Form {
    pub agents: u64,
    pub interval: String,
    pub always_active: bool,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub schema: SchemaSpec,
    pub columns_expanded: bool,
    pub decimals: usize,
}

impl Default for Form {
    fn default() -> Self {
        Self {
            agents: 1,
            interval: DEFAULT_INTERVAL.into(),
            always_active: true,
            start: TimeOfDay { hour: 9, minute: 0 },
            end: TimeOfDay { hour: 17, minute: 0 },
            schema: SchemaSpec::default(),
            columns_expanded: true,
            decimals: DEFAULT_DECIMALS,
        }
    }
}

impl Form {
    pub fn set_agents(&mut self, agents: i64) {
        self.agents = agents.max(0) as u64;
    }

    pub fn set_interval(&mut self, interval: impl Into<String>) {
        self.interval = interval.into();
    }

    pub fn set_always_active(&mut self, always_active: bool) {
        self.always_active = always_active;
    }

    /// Selects the work window.
    pub fn set_hours(&mut self, start: TimeOfDay, end: TimeOfDay) {
        self.start = start;
        self.end = end;
        self.always_active = false;
    }

    /// Selects the work window when either bound is given, keeping the current value
    /// of the missing one. Leaves the window untouched when neither is given.
    pub fn set_bounds(&mut self, start: Option<TimeOfDay>, end: Option<TimeOfDay>) {
        if start.is_some() || end.is_some() {
            self.set_hours(start.unwrap_or(self.start), end.unwrap_or(self.end));
        }
    }

    pub fn window(&self) -> ActivityWindow {
        if self.always_active {
            ActivityWindow::AlwaysActive
        } else {
            ActivityWindow::Between {
                start: self.start,
                end: self.end,
            }
        }
    }

    pub fn add_column(&mut self, column: ColumnSpec) {
        self.schema.columns.push(column);
    }

    /// Removes the column at a 1-based position.
    pub fn remove_column(&mut self, index: usize) -> Result<ColumnSpec, errors::Error> {
        let i = self.position(index)?;
        Ok(self.schema.columns.remove(i))
    }

    pub fn column_mut(&mut self, index: usize) -> Result<&mut ColumnSpec, errors::Error> {
        let i = self.position(index)?;
        Ok(&mut self.schema.columns[i])
    }

    pub fn set_column_length(&mut self, index: usize, length: i64) -> Result<(), errors::Error> {
        self.column_mut(index)?.length = Some(length.max(0) as u64);
        Ok(())
    }

    pub fn clear_columns(&mut self) {
        self.schema.columns.clear();
    }

    pub fn toggle_columns(&mut self) -> bool {
        self.columns_expanded = !self.columns_expanded;
        self.columns_expanded
    }

    /// Recomputes the projection from scratch.
    pub fn projection(&self) -> Projection {
        estimate::project(&self.schema, &self.interval, &self.window(), self.agents)
    }

    fn position(&self, index: usize) -> Result<usize, errors::Error> {
        if index == 0 || index > self.schema.columns.len() {
            return Err(err!(
                Schema,
                "Column {} doesn't exist ({} defined)",
                index,
                self.schema.columns.len()
            ));
        }
        Ok(index - 1)
    }
}

pub struct Session {
    pub id: Uuid,
    pub form: Form,
}

impl Session {
    pub fn open(form: Form) -> Self {
        let session = Session {
            id: Uuid::new_v4(),
            form,
        };
        info!(session_id = session.id.to_string(), "Opened estimation session.");
        session
    }

    /// Applies an edit to the form. Non-edit commands are left to the caller.
    pub fn apply(&mut self, command: &Command) -> Result<(), errors::Error> {
        debug!(session_id = self.id.to_string(), ?command, "Applying command");
        let form = &mut self.form;
        match command {
            Command::Agents(n) => form.agents = *n,
            Command::Interval(text) => form.set_interval(text.as_str()),
            Command::AlwaysActive => form.set_always_active(true),
            Command::Hours { start, end } => form.set_hours(*start, *end),
            Command::AddColumn(column) => form.add_column(column.clone()),
            Command::RemoveColumn(index) => {
                form.remove_column(*index)?;
            }
            Command::SetColumnType { index, type_ } => form.column_mut(*index)?.type_ = *type_,
            Command::SetColumnLength { index, length } => {
                form.column_mut(*index)?.length = Some(*length)
            }
            Command::ClearColumns => form.clear_columns(),
            Command::ToggleColumns => {
                form.toggle_columns();
            }
            Command::Decimals(n) => form.decimals = *n,
            Command::Types | Command::Show | Command::Help | Command::Quit => {}
        }
        Ok(())
    }

    pub fn close(&mut self) {
        info!(session_id = self.id.to_string(), "Closed estimation session.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command;
    use crate::schema::ColumnType;

    #[test]
    fn test_default_form_projection() {
        let form = Form::default();
        let p = form.projection();
        assert!(p.is_valid());
        assert_eq!(p.result.row_size_bytes, 20);
        assert_eq!(p.result.rows_per_day, 1440);
        assert_eq!(p.result.active_hours_per_day, 24.0);
    }

    #[test]
    fn test_clamping() {
        let mut form = Form::default();
        form.set_agents(-10);
        assert_eq!(form.agents, 0);

        form.add_column(ColumnSpec::new(ColumnType::VARCHAR, Some(10)));
        form.set_column_length(1, -5).unwrap();
        assert_eq!(form.schema.columns[0].length, Some(0));
        assert_eq!(form.projection().result.row_size_bytes, 22);
    }

    #[test]
    fn test_remove_out_of_range() {
        let mut form = Form::default();
        assert_eq!(form.remove_column(0).unwrap_err().code(), 5000);
        form.add_column(ColumnSpec::new(ColumnType::INT, None));
        assert_eq!(form.remove_column(2).unwrap_err().code(), 5000);
        assert_eq!(form.remove_column(1).unwrap().type_, ColumnType::INT);
        assert!(form.schema.columns.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut form = Form::default();
        let initial = form.columns_expanded;
        form.toggle_columns();
        assert_ne!(form.columns_expanded, initial);
        form.toggle_columns();
        assert_eq!(form.columns_expanded, initial);
    }

    #[test]
    fn test_window_selection() {
        let mut form = Form::default();
        assert_eq!(form.window(), ActivityWindow::AlwaysActive);
        form.set_hours(TimeOfDay::new(22, 0).unwrap(), TimeOfDay::new(6, 0).unwrap());
        assert_eq!(form.projection().result.active_hours_per_day, 8.0);
        form.set_always_active(true);
        assert_eq!(form.projection().result.active_hours_per_day, 24.0);
    }

    #[test]
    fn test_set_bounds_fills_missing_bound() {
        let mut form = Form::default();
        form.set_bounds(None, None);
        assert_eq!(form.window(), ActivityWindow::AlwaysActive);

        form.set_bounds(Some(TimeOfDay::new(13, 0).unwrap()), None);
        assert_eq!(
            form.window(),
            ActivityWindow::Between {
                start: TimeOfDay::new(13, 0).unwrap(),
                end: TimeOfDay::new(17, 0).unwrap(),
            }
        );

        let mut form = Form::default();
        form.set_bounds(None, Some(TimeOfDay::new(8, 0).unwrap()));
        assert_eq!(
            form.window(),
            ActivityWindow::Between {
                start: TimeOfDay::new(9, 0).unwrap(),
                end: TimeOfDay::new(8, 0).unwrap(),
            }
        );
        assert_eq!(form.projection().result.active_hours_per_day, 23.0);
    }

    #[test]
    fn test_invalid_interval_zeroes_projection() {
        let mut form = Form::default();
        form.set_interval("00:00:00");
        let p = form.projection();
        assert!(!p.is_valid());
        assert_eq!(p.result, estimate::EstimationResult::default());
    }

    #[test]
    fn test_session_applies_commands() {
        let mut session = Session::open(Form::default());
        for line in [
            "agents 100",
            "interval 00:01:00",
            "column add varchar 50 payload",
            "column add int",
            "column rm 2",
        ] {
            session.apply(&command::parse(line).unwrap()).unwrap();
        }
        let p = session.form.projection();
        assert_eq!(p.result.row_size_bytes, 72);
        assert_eq!(p.result.rows_per_day, 144_000);
        assert_eq!(p.result.daily_bytes, 10_368_000.0);
    }

    #[test]
    fn test_session_rejects_missing_column() {
        let mut session = Session::open(Form::default());
        let err = session
            .apply(&command::parse("column type 3 uuid").unwrap())
            .unwrap_err();
        assert_eq!(err.code(), 5000);
    }
}
