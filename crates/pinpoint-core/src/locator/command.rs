//! Playwright statements built around a locator expression.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),
    #[error("Unknown assertion: {0}")]
    UnknownAssertion(String),
    #[error("Missing argument: {0} requires a value")]
    MissingArgument(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// A user action to replay on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Click,
    DblClick,
    Fill(String),
    Type(String),
    Check,
    Uncheck,
    /// One or more option values
    SelectOption(Vec<String>),
    Hover,
    Press(String),
    /// File paths; empty means "placeholder path"
    SetInputFiles(Vec<String>),
}

impl Action {
    /// Build an action from its Playwright method name and an optional value.
    ///
    /// `selectOption` and `setInputFiles` split the value on commas.
    pub fn parse(name: &str, value: Option<&str>) -> Result<Self, CommandError> {
        let required = |name: &str| {
            value
                .map(str::to_string)
                .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
        };
        let list = || {
            value
                .map(|v| {
                    v.split(',')
                        .map(|item| item.trim().to_string())
                        .filter(|item| !item.is_empty())
                        .collect::<Vec<String>>()
                })
                .unwrap_or_default()
        };

        Ok(match name {
            "click" => Action::Click,
            "dblclick" => Action::DblClick,
            "fill" => Action::Fill(required(name)?),
            "type" => Action::Type(required(name)?),
            "check" => Action::Check,
            "uncheck" => Action::Uncheck,
            "selectOption" => {
                let values = list();
                if values.is_empty() {
                    return Err(CommandError::MissingArgument(name.to_string()));
                }
                Action::SelectOption(values)
            }
            "hover" => Action::Hover,
            "press" => Action::Press(required(name)?),
            "setInputFiles" => Action::SetInputFiles(list()),
            other => return Err(CommandError::UnknownAction(other.to_string())),
        })
    }

    pub fn method(&self) -> &'static str {
        match self {
            Action::Click => "click",
            Action::DblClick => "dblclick",
            Action::Fill(_) => "fill",
            Action::Type(_) => "type",
            Action::Check => "check",
            Action::Uncheck => "uncheck",
            Action::SelectOption(_) => "selectOption",
            Action::Hover => "hover",
            Action::Press(_) => "press",
            Action::SetInputFiles(_) => "setInputFiles",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

/// Click options carried into `click()` / `dblclick()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOptions {
    #[serde(default)]
    pub button: MouseButton,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<String>,
}

impl ActionOptions {
    /// `{"button":"right","modifiers":["Shift"]}`, or `None` when every
    /// option has its default value.
    fn to_json(&self) -> Option<String> {
        let mut opts = Map::new();
        if self.button != MouseButton::Left {
            opts.insert("button".into(), Value::from(self.button.as_str()));
        }
        if !self.modifiers.is_empty() {
            opts.insert("modifiers".into(), Value::from(self.modifiers.clone()));
        }
        (!opts.is_empty()).then(|| Value::Object(opts).to_string())
    }
}

/// A web-first assertion on an element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    ToBeVisible,
    ToHaveText(String),
    ToHaveValue(String),
    ToBeEnabled,
    ToBeDisabled,
    ToHaveCount(usize),
}

impl Assertion {
    pub fn parse(name: &str, expected: Option<&str>) -> Result<Self, CommandError> {
        let required = || {
            expected
                .map(str::to_string)
                .ok_or_else(|| CommandError::MissingArgument(name.to_string()))
        };

        Ok(match name {
            "toBeVisible" => Assertion::ToBeVisible,
            "toHaveText" => Assertion::ToHaveText(required()?),
            "toHaveValue" => Assertion::ToHaveValue(required()?),
            "toBeEnabled" => Assertion::ToBeEnabled,
            "toBeDisabled" => Assertion::ToBeDisabled,
            "toHaveCount" => {
                let count = required()?;
                let count = count.trim().parse().map_err(|_| {
                    CommandError::InvalidArgument(format!(
                        "toHaveCount expects a number, got '{}'",
                        count
                    ))
                })?;
                Assertion::ToHaveCount(count)
            }
            other => return Err(CommandError::UnknownAssertion(other.to_string())),
        })
    }

    /// Whether a text-based locator would make the assertion tautological.
    pub fn excludes_text_locator(&self) -> bool {
        matches!(self, Assertion::ToHaveText(_))
    }
}

/// JSON-escape `text` and wrap it in backticks.
pub fn quote(text: &str) -> String {
    let json = Value::from(text).to_string();
    let inner = &json[1..json.len() - 1];
    format!("`{}`", inner.replace('`', "\\`").replace("${", "\\${"))
}

/// `await <locator>.<action>(...);`
pub fn build_action_command(locator: &str, action: &Action, options: &ActionOptions) -> String {
    let args = match action {
        Action::Click | Action::DblClick => options.to_json().unwrap_or_default(),
        Action::Fill(value) | Action::Type(value) | Action::Press(value) => quote(value),
        Action::SelectOption(values) => match values.as_slice() {
            [single] => Value::from(single.as_str()).to_string(),
            many => Value::from(many.to_vec()).to_string(),
        },
        Action::SetInputFiles(files) => {
            let files: Vec<Value> = if files.is_empty() {
                vec![Value::from("path/to/your-file.ext")]
            } else {
                files.iter().map(|f| Value::from(f.as_str())).collect()
            };
            let literal = files
                .iter()
                .map(Value::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("[{}]", literal)
        }
        Action::Check | Action::Uncheck | Action::Hover => String::new(),
    };
    format!("await {}.{}({});", locator, action.method(), args)
}

/// `await expect(<locator>).<assertion>(...);`
pub fn build_assertion_command(locator: &str, assertion: &Assertion) -> String {
    match assertion {
        Assertion::ToBeVisible => format!("await expect({}).toBeVisible();", locator),
        Assertion::ToHaveText(text) => {
            format!("await expect({}).toHaveText({});", locator, quote(text))
        }
        Assertion::ToHaveValue(value) => {
            format!("await expect({}).toHaveValue({});", locator, quote(value))
        }
        Assertion::ToBeEnabled => format!("await expect({}).toBeEnabled();", locator),
        Assertion::ToBeDisabled => format!("await expect({}).toBeDisabled();", locator),
        Assertion::ToHaveCount(count) => {
            format!("await expect({}).toHaveCount({});", locator, count)
        }
    }
}

/// Navigation to `url` with each of the useful wait strategies.
pub fn goto_commands(url: &str) -> Vec<String> {
    let url = quote(url);
    vec![
        format!("await page.goto({});", url),
        format!("await page.goto({}, {{ waitUntil: 'networkidle' }});", url),
        format!("await page.goto({}, {{ waitUntil: 'load' }});", url),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const LOCATOR: &str = "page.getByTestId(`save`)";

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("Sign in"), "`Sign in`");
        assert_eq!(quote("say \"hi\"\n"), "`say \\\"hi\\\"\\n`");
        assert_eq!(quote("a`b ${x}"), "`a\\`b \\${x}`");
    }

    #[test]
    fn test_click_options() {
        assert_eq!(
            build_action_command(LOCATOR, &Action::Click, &ActionOptions::default()),
            "await page.getByTestId(`save`).click();"
        );

        let options = ActionOptions {
            button: MouseButton::Right,
            modifiers: vec!["Shift".into()],
        };
        assert_eq!(
            build_action_command(LOCATOR, &Action::DblClick, &options),
            r#"await page.getByTestId(`save`).dblclick({"button":"right","modifiers":["Shift"]});"#
        );
    }

    #[test]
    fn test_value_actions() {
        let opts = ActionOptions::default();
        assert_eq!(
            build_action_command(LOCATOR, &Action::Fill("alice".into()), &opts),
            "await page.getByTestId(`save`).fill(`alice`);"
        );
        assert_eq!(
            build_action_command(LOCATOR, &Action::SelectOption(vec!["blue".into()]), &opts),
            r#"await page.getByTestId(`save`).selectOption("blue");"#
        );
        assert_eq!(
            build_action_command(
                LOCATOR,
                &Action::SelectOption(vec!["a".into(), "b".into()]),
                &opts
            ),
            r#"await page.getByTestId(`save`).selectOption(["a","b"]);"#
        );
        assert_eq!(
            build_action_command(LOCATOR, &Action::SetInputFiles(vec![]), &opts),
            r#"await page.getByTestId(`save`).setInputFiles(["path/to/your-file.ext"]);"#
        );
    }

    #[test]
    fn test_parse_action() {
        assert_eq!(Action::parse("click", None), Ok(Action::Click));
        assert_eq!(
            Action::parse("selectOption", Some("a, b")),
            Ok(Action::SelectOption(vec!["a".into(), "b".into()]))
        );
        assert_eq!(
            Action::parse("fill", None),
            Err(CommandError::MissingArgument("fill".into()))
        );
        assert!(matches!(
            Action::parse("drag", None),
            Err(CommandError::UnknownAction(_))
        ));
    }

    #[test]
    fn test_assertions() {
        assert_eq!(
            build_assertion_command(LOCATOR, &Assertion::ToHaveCount(3)),
            "await expect(page.getByTestId(`save`)).toHaveCount(3);"
        );
        assert!(matches!(
            Assertion::parse("toHaveCount", Some("many")),
            Err(CommandError::InvalidArgument(_))
        ));
        assert!(Assertion::ToHaveText("x".into()).excludes_text_locator());
    }

    #[test]
    fn test_goto_commands() {
        let cmds = goto_commands("https://example.com");
        assert_eq!(cmds.len(), 3);
        assert_eq!(cmds[1], "await page.goto(`https://example.com`, { waitUntil: 'networkidle' });");
    }
}
