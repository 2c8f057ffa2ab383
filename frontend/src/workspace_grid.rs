use yew::{html, Children, Component, Context, Html, Properties};

/// Equal-width column layout for the kanban board and the bid card list.
#[derive(Properties, PartialEq)]
pub struct WorkspaceGridProps {
    pub columns: usize,
    /// Columns never shrink below this width; the grid scrolls instead.
    #[prop_or(220)]
    pub min_column_px: u32,
    pub children: Children,
}

pub struct WorkspaceGrid;

impl Component for WorkspaceGrid {
    type Message = ();
    type Properties = WorkspaceGridProps;

    fn create(_ctx: &Context<Self>) -> Self {
        WorkspaceGrid
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let style = format!(
            "display: grid;
             grid-template-columns: repeat({}, minmax({}px, 1fr));
             gap: 16px;
             align-items: start;
             overflow-x: auto;",
            props.columns.max(1),
            props.min_column_px
        );

        html! {
            <div class="workspace-grid" style={style}>
                { for props.children.iter() }
            </div>
        }
    }
}
