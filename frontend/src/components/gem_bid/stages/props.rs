use common::model::bid::GemBid;
use common::model::stage::ViewMode;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct GemBidStagesProps {
    pub bid: GemBid,
    #[prop_or_default]
    pub view_mode: ViewMode,
    pub on_view_mode_change: Callback<ViewMode>,
    /// Fired after a stage update, since it may move the bid's current stage.
    #[prop_or_default]
    pub on_bid_changed: Callback<()>,
}
