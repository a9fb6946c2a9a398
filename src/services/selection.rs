//! Which album photo to show next.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::models::Asset;

/// Order in which album photos are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageOrder {
    /// Any photo not yet shown, uniformly at random.
    #[default]
    Random,
    /// Most recent capture time first.
    Newest,
}

impl FromStr for ImageOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" => Ok(ImageOrder::Random),
            "newest" => Ok(ImageOrder::Newest),
            other => Err(other.to_string()),
        }
    }
}

impl fmt::Display for ImageOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ImageOrder::Random => "random",
            ImageOrder::Newest => "newest",
        })
    }
}

/// The chosen asset and whether the "already shown" ledger starts over.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection<'a> {
    pub asset: &'a Asset,
    pub reset_ledger: bool,
}

/// Pick the next asset, or `None` for an empty album.
///
/// `shown` holds the ids already displayed in the current cycle. When every
/// asset has been shown the cycle restarts. Under [`ImageOrder::Newest`] a
/// photo added since the cycle began (a new newest) also restarts it, so new
/// uploads appear on the next wakeup.
pub fn select<'a, R: Rng + ?Sized>(
    assets: &'a [Asset],
    shown: &HashSet<String>,
    order: ImageOrder,
    rng: &mut R,
) -> Option<Selection<'a>> {
    match order {
        ImageOrder::Random => {
            let remaining: Vec<&Asset> = assets.iter().filter(|a| !shown.contains(&a.id)).collect();
            if let Some(&asset) = remaining.choose(rng) {
                return Some(Selection {
                    asset,
                    reset_ledger: false,
                });
            }
            assets.choose(rng).map(|asset| Selection {
                asset,
                reset_ledger: true,
            })
        }
        ImageOrder::Newest => {
            let mut sorted: Vec<&Asset> = assets.iter().collect();
            // Stable: equal timestamps keep album order
            sorted.sort_by_key(|a| std::cmp::Reverse(a.taken_at()));
            let newest = *sorted.first()?;

            if shown.is_empty() || !shown.contains(&newest.id) {
                return Some(Selection {
                    asset: newest,
                    reset_ledger: true,
                });
            }
            match sorted.into_iter().find(|a| !shown.contains(&a.id)) {
                Some(asset) => Some(Selection {
                    asset,
                    reset_ledger: false,
                }),
                None => Some(Selection {
                    asset: newest,
                    reset_ledger: true,
                }),
            }
        }
    }
}
