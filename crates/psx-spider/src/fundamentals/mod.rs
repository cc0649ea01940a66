/// Company overview fundamentals from the [Alpha Vantage] `OVERVIEW` function.
///
/// [Alpha Vantage]: https://www.alphavantage.co/documentation/#company-overview
pub mod alpha_vantage;
