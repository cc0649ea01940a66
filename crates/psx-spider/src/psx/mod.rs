/// Sector classifications and listed companies from the [PSX] listings page.
///
/// [PSX]: https://www.psx.com.pk/psx/resources-and-tools/listings/listed-companies
pub mod listings;

/// Per-sector company searches against the PSX search endpoint.
pub mod companies;
