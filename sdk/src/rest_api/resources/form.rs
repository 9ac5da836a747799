// Copyright 2021 Cargill Incorporated
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Submitted `application/x-www-form-urlencoded` bodies and the redirects that answer them.

use std::collections::BTreeMap;
use std::str::FromStr;

use super::error::ErrorResponse;

/// The button a form was submitted with
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FormAction {
    Save,
    Modify,
    New,
    Close,
    Delete,
    Accept,
    Hold,
    Release,
    Split,
    Cancel,
    Finish,
}

impl FormAction {
    /// Whether the action writes the submitted values
    pub fn is_save(&self) -> bool {
        matches!(self, FormAction::Save | FormAction::Modify)
    }
}

impl FromStr for FormAction {
    type Err = ErrorResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "" | "save" => Ok(FormAction::Save),
            "modify" => Ok(FormAction::Modify),
            "new" => Ok(FormAction::New),
            "close" => Ok(FormAction::Close),
            "delete" => Ok(FormAction::Delete),
            "accept" => Ok(FormAction::Accept),
            "hold" => Ok(FormAction::Hold),
            "release" => Ok(FormAction::Release),
            "split" => Ok(FormAction::Split),
            "cancel" => Ok(FormAction::Cancel),
            "finish" => Ok(FormAction::Finish),
            other => Err(ErrorResponse::new(
                400,
                &format!("Unknown form action: {}", other),
            )),
        }
    }
}

/// A `303 See Other` target
#[derive(Clone, Debug, PartialEq)]
pub struct Redirect {
    location: String,
}

impl Redirect {
    pub fn to(location: &str) -> Self {
        debug!("Redirecting to {}", location);
        Redirect {
            location: location.to_string(),
        }
    }

    pub fn location(&self) -> &str {
        &self.location
    }
}

/// Answers `new` with the empty screen and `close` with the dashboard; other actions are left
/// to the caller.
pub fn navigate(action: FormAction, screen: &str, dashboard: &str) -> Option<Redirect> {
    match action {
        FormAction::New => Some(Redirect::to(screen)),
        FormAction::Close => Some(Redirect::to(dashboard)),
        _ => None,
    }
}

pub fn unsupported(action: FormAction) -> ErrorResponse {
    ErrorResponse::new(
        400,
        &format!("Action {:?} is not available on this screen", action),
    )
}

/// Field values of a submitted form, in submission order.
///
/// Repeated rows use the `<prefix>-<index>-<field>` naming, e.g. `items-0-percent`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormData {
    fields: Vec<(String, String)>,
}

impl FormData {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        FormData { fields }
    }

    /// The first value posted for `name`, or an empty string
    pub fn get(&self, name: &str) -> &str {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or("")
    }

    pub fn action(&self) -> Result<FormAction, ErrorResponse> {
        self.get("action").parse()
    }

    /// The rows posted under `prefix`, ordered by index. Rows whose values are all blank are
    /// skipped.
    pub fn rows(&self, prefix: &str) -> Vec<FormRow> {
        let mut rows: BTreeMap<usize, BTreeMap<String, String>> = BTreeMap::new();
        let start = format!("{}-", prefix);

        for (key, value) in &self.fields {
            let rest = match key.strip_prefix(&start) {
                Some(rest) => rest,
                None => continue,
            };
            let mut parts = rest.splitn(2, '-');
            let index = parts.next().and_then(|index| index.parse::<usize>().ok());
            let field = parts.next();
            if let (Some(index), Some(field)) = (index, field) {
                rows.entry(index)
                    .or_insert_with(BTreeMap::new)
                    .entry(field.to_string())
                    .or_insert_with(|| value.clone());
            }
        }

        rows.into_iter()
            .filter(|(_, fields)| fields.values().any(|value| !value.trim().is_empty()))
            .map(|(index, fields)| FormRow {
                prefix: prefix.to_string(),
                index,
                fields,
            })
            .collect()
    }

    /// The submitted values, echoed back when the form is rejected
    pub fn echo(&self) -> BTreeMap<String, String> {
        let mut echo = BTreeMap::new();
        for (key, value) in &self.fields {
            echo.entry(key.clone()).or_insert_with(|| value.clone());
        }
        echo
    }
}

/// One repeated row of a form
#[derive(Clone, Debug, PartialEq)]
pub struct FormRow {
    prefix: String,
    index: usize,
    fields: BTreeMap<String, String>,
}

impl FormRow {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, field: &str) -> &str {
        self.fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// The full form field name, used to report errors against this row
    pub fn field_name(&self, field: &str) -> String {
        format!("{}-{}-{}", self.prefix, self.index, field)
    }
}

#[cfg(test)]
pub(crate) fn form(fields: &[(&str, &str)]) -> FormData {
    FormData::new(
        fields
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_parsing() {
        assert_eq!(form(&[]).action().ok(), Some(FormAction::Save));
        assert_eq!(
            form(&[("action", "close")]).action().ok(),
            Some(FormAction::Close)
        );
        match form(&[("action", "explode")]).action() {
            Err(err) => assert_eq!(err.status_code(), 400),
            Ok(action) => panic!("Expected error, got {:?}", action),
        }
    }

    #[test]
    fn test_navigate() {
        assert_eq!(
            navigate(FormAction::Close, "/masters/units/", "/masters/"),
            Some(Redirect::to("/masters/"))
        );
        assert_eq!(
            navigate(FormAction::New, "/masters/units/", "/masters/"),
            Some(Redirect::to("/masters/units/"))
        );
        assert_eq!(navigate(FormAction::Save, "/masters/units/", "/masters/"), None);
    }

    #[test]
    fn test_rows_are_ordered_and_blank_rows_skipped() {
        let data = form(&[
            ("product_id", "4"),
            ("items-1-material_id", "7"),
            ("items-1-percent", "40"),
            ("items-0-material_id", "3"),
            ("items-0-percent", "60"),
            ("items-2-material_id", ""),
            ("items-2-percent", " "),
            ("items-x-percent", "10"),
        ]);

        let rows = data.rows("items");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].index(), 0);
        assert_eq!(rows[0].get("material_id"), "3");
        assert_eq!(rows[1].get("percent"), "40");
        assert_eq!(rows[1].field_name("percent"), "items-1-percent");
        assert_eq!(rows[1].get("qty"), "");
    }

    #[test]
    fn test_echo_keeps_first_value() {
        let data = form(&[("name", "Paint Shop"), ("name", "ignored"), ("action", "save")]);
        let echo = data.echo();
        assert_eq!(echo.get("name").map(String::as_str), Some("Paint Shop"));
        assert_eq!(echo.len(), 2);
        assert_eq!(data.get("missing"), "");
    }
}
