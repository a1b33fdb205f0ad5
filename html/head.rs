use crate::*;

/// Renders into a `<head>` tag with builder-like interface
pub struct Head<'a> {
    title: &'a str,
    charset: &'a str,
    viewport: Option<&'a str>,
    stylesheets: Vec<&'a str>,
}

impl<'a> Head<'a> {
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }
    pub fn css(mut self, path: &'a str) -> Self {
        self.stylesheets.push(path);
        self
    }
    /// Builds a [`Head`] for the todo list page
    pub fn with_title(title: &'a str) -> Self {
        Self::default().title(title).css(STYLESHEET_PATH)
    }
}

impl<'a> Default for Head<'a> {
    fn default() -> Self {
        Self {
            title: "Todo list",
            charset: "UTF-8",
            viewport: Some("width=device-width, initial-scale=1.0"),
            stylesheets: vec![],
        }
    }
}

impl<'a> Render for Head<'a> {
    fn render(&self) -> Markup {
        html!(
            head {
                meta charset=(self.charset);
                @if let Some(viewport) = self.viewport { meta name="viewport" content=(viewport); }
                title {(self.title)}
                @for stylesheet in &self.stylesheets {
                    link rel="stylesheet" href=(stylesheet);
                }
            }
        )
    }
}
