//! Calendar notes
//!
//! Each call returns the note for a period, creating it on first use.

use chrono::{Datelike, NaiveDate};
use serde_json::json;

use super::TriliumClient;
use crate::error::Result;
use crate::model::{format_day, format_month, Note, WeekNoteOptions};

impl TriliumClient {
    pub fn get_root_calendar_note(&self) -> Result<Option<Note>> {
        self.request_entity("getRootCalendarNote", vec![])
    }

    pub fn get_date_note(&self, date: NaiveDate) -> Result<Option<Note>> {
        self.request_entity("getDateNote", vec![json!(format_day(date))])
    }

    /// Day note for the server's "today"
    pub fn get_today_note(&self) -> Result<Option<Note>> {
        self.request_entity("getTodayNote", vec![])
    }

    pub fn get_week_note(&self, date: NaiveDate, options: WeekNoteOptions) -> Result<Option<Note>> {
        self.request_entity(
            "getWeekNote",
            vec![json!(format_day(date)), serde_json::to_value(options)?],
        )
    }

    /// Month note for the month containing `date`
    pub fn get_month_note(&self, date: NaiveDate) -> Result<Option<Note>> {
        self.request_entity("getMonthNote", vec![json!(format_month(date))])
    }

    pub fn get_year_note(&self, year: i32) -> Result<Option<Note>> {
        self.request_entity("getYearNote", vec![json!(format!("{:04}", year))])
    }

    /// Year note for the year containing `date`
    pub fn get_year_note_for(&self, date: NaiveDate) -> Result<Option<Note>> {
        self.get_year_note(date.year())
    }
}
