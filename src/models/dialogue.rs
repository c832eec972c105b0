/// Stage of the tracking conversation for one chat.
///
/// Everything the user typed so far lives in the variant itself, so an
/// abandoned dialogue leaves nothing behind once the session is reset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogueState {
    #[default]
    Idle,
    CurrentCoin,
    ChoiceState {
        coin: String,
    },
    MinPrice {
        coin: String,
    },
    MaxPrice {
        coin: String,
        min_price: String,
    },
}
