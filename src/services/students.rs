//! Students listing service

use std::borrow::Cow;
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::student::{Student, StudentKind, StudentQuery},
    table::{FilterMode, Row, Table},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentColumn {
    Kind,
    Subject,
    Keywords,
}

impl Row for Student {
    type Column = StudentColumn;

    fn cell_text(&self, column: StudentColumn) -> Cow<'_, str> {
        match column {
            StudentColumn::Kind => Cow::Borrowed(self.kind.label()),
            StudentColumn::Subject => Cow::Borrowed(&self.subject),
            StudentColumn::Keywords => Cow::Owned(self.keywords_text()),
        }
    }
}

#[derive(Clone)]
pub struct StudentsService {
    students: Arc<Vec<Student>>,
}

impl StudentsService {
    pub fn new(students: Vec<Student>) -> Self {
        Self {
            students: Arc::new(students),
        }
    }

    /// Students matching every given filter, in configured order
    pub fn list(&self, query: &StudentQuery) -> AppResult<Vec<Student>> {
        let mut table = Table::new(self.students.as_slice(), self.students.len());

        if let Some(subject) = &query.subject {
            table.set_filter(StudentColumn::Subject, FilterMode::Contains, subject);
        }
        if let Some(keywords) = &query.keywords {
            table.set_filter(StudentColumn::Keywords, FilterMode::Contains, keywords);
        }
        if let Some(kind) = query.kind.as_deref().filter(|k| !k.is_empty()) {
            let kind: StudentKind = kind.parse()?;
            table.set_filter(StudentColumn::Kind, FilterMode::Equals, kind.label());
        }

        Ok(table
            .visible_rows()
            .into_iter()
            .map(|(_, student)| student.clone())
            .collect())
    }
}
