use crate::{
    language::{Direction, Language},
    ui::{
        Localizable, Localizer,
        widgets::{Button, ImageView, Label, SegmentedControl, TabBar, TextField, TextView},
    },
};

/// What a [`View`] node displays.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Widget {
    /// Plain container; only its children relocalize.
    #[default]
    Container,
    Label(Label),
    Button(Button),
    TextField(TextField),
    TextView(TextView),
    ImageView(ImageView),
    TabBar(TabBar),
    SegmentedControl(SegmentedControl),
}

impl Localizable for Widget {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        match self {
            Widget::Container => {}
            Widget::Label(label) => label.localize(localizer),
            Widget::Button(button) => button.localize(localizer),
            Widget::TextField(field) => field.localize(localizer),
            Widget::TextView(view) => view.localize(localizer),
            Widget::ImageView(view) => view.localize(localizer),
            Widget::TabBar(bar) => bar.localize(localizer),
            Widget::SegmentedControl(control) => control.localize(localizer),
        }
    }
}

/// A node of the component tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct View {
    pub widget: Widget,
    pub children: Vec<View>,
    /// Forced layout direction, if any.
    pub semantic_direction: Option<Direction>,
}

impl View {
    pub fn container(children: Vec<View>) -> Self {
        View {
            widget: Widget::Container,
            children,
            semantic_direction: None,
        }
    }

    pub fn new(widget: impl Into<Widget>) -> Self {
        View {
            widget: widget.into(),
            ..View::default()
        }
    }

    pub fn with_child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    /// Forces `language`'s direction on this view and, if `recursive`, on all descendants.
    pub fn set_semantic_direction(&mut self, language: Language, recursive: bool) {
        self.semantic_direction = Some(language.direction());
        if !recursive {
            return;
        }
        for child in &mut self.children {
            child.set_semantic_direction(language, recursive);
        }
    }

    /// Depth-first iteration over this view and its descendants.
    pub fn descendants(&self) -> Vec<&View> {
        let mut out = vec![self];
        for child in &self.children {
            out.extend(child.descendants());
        }
        out
    }
}

impl Localizable for View {
    fn localize(&mut self, localizer: &Localizer<'_>) {
        self.widget.localize(localizer);
        for child in &mut self.children {
            child.localize(localizer);
        }
    }
}

macro_rules! impl_widget_from {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Widget {
                fn from(value: $variant) -> Self {
                    Widget::$variant(value)
                }
            }
        )*
    };
}

impl_widget_from!(
    Label,
    Button,
    TextField,
    TextView,
    ImageView,
    TabBar,
    SegmentedControl
);
