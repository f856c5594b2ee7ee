use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::{Indicator, ProbeError};

static RESULT: LazyLock<Selector> = LazyLock::new(|| selector("#result"));
static LIST: LazyLock<Selector> = LazyLock::new(|| selector("ul"));
static ITEM: LazyLock<Selector> = LazyLock::new(|| selector("li"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector parses")
}

/// Extract the indicator list from the service page: the first `#result`
/// element, its first `ul`, then every `li` below it.
pub fn parse_indicators(html: &str) -> Result<Vec<Indicator>, ProbeError> {
    let document = Html::parse_document(html);
    let result = document
        .select(&RESULT)
        .next()
        .ok_or_else(|| ProbeError::malformed("no #result element"))?;
    let list = result
        .select(&LIST)
        .next()
        .ok_or_else(|| ProbeError::malformed("no result list"))?;

    list.select(&ITEM).map(indicator_from).collect()
}

/// First class as written in the markup. `Element::classes` does not keep
/// attribute order, so the raw attribute is split instead.
fn indicator_from(item: ElementRef<'_>) -> Result<Indicator, ProbeError> {
    item.value()
        .attr("class")
        .and_then(|classes| classes.split_whitespace().next())
        .map(Indicator::new)
        .ok_or_else(|| ProbeError::malformed("result item without class"))
}
