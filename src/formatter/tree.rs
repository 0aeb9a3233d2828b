use std::{io, path::Path};

use crate::{
    formatter::{FmtListItem, ListFormatter},
    item::TestItem,
};

/// Renders a listing as a collection tree.
///
/// A `<Module ...>` line is written whenever the module changes and a
/// `<Class ...>` line whenever the class changes, followed by one
/// `<Function ...>` line per item:
///
/// ```text
/// <Module test_example.py>
///   <Function test_one[red-a-1]>
///   <Function test_two[red-a-1]>
/// ```
#[derive(Debug)]
pub struct TreeFormatter<W: io::Write> {
    target: W,
    module: Option<String>,
    class: Option<String>,
}

impl Default for TreeFormatter<io::Stdout> {
    fn default() -> Self {
        Self {
            target: io::stdout(),
            module: None,
            class: None,
        }
    }
}

impl<W: io::Write> TreeFormatter<W> {
    pub fn with_target<WithTarget: io::Write>(self, target: WithTarget) -> TreeFormatter<WithTarget> {
        TreeFormatter {
            target,
            module: self.module,
            class: self.class,
        }
    }

    pub fn into_target(self) -> W {
        self.target
    }
}

fn module_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

impl<'t, W: io::Write> ListFormatter<'t, TestItem> for TreeFormatter<W> {
    type Error = io::Error;

    type ListItem = FmtListItem<'t, TestItem>;
    fn fmt_list_item(&mut self, data: Self::ListItem) -> Result<(), Self::Error> {
        let item = data.item;

        let module = module_name(&item.path);
        if self.module.as_ref() != Some(&module) {
            writeln!(self.target, "<Module {module}>")?;
            self.module = Some(module);
            self.class = None;
        }

        let class = item.class.as_deref();
        if let Some(class) = class
            && self.class.as_deref() != Some(class)
        {
            writeln!(self.target, "  <Class {class}>")?;
        }
        self.class = class.map(str::to_owned);

        let indent = match self.class {
            Some(_) => "    ",
            None => "  ",
        };
        writeln!(self.target, "{indent}<Function {}>", item.name)
    }

    type BeginListing = ();
    type EndListing = ();
}
