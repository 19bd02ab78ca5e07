//! # seed
//!
//! The static service dataset loaded at start-up. It is the source of truth
//! for "default values" and is never mutated; volumes are illustrative.

use crate::models::{ServiceSeed, VolumeProfile};

#[allow(clippy::too_many_arguments)]
fn seed(
    id:            &str,
    name:          &str,
    icon:          &str,
    color:         &str,
    base_price:    f64,
    average_price: f64,
    buy_margin:    f64,
    sell_margin:   f64,
    volumes:       VolumeProfile,
) -> ServiceSeed {
    ServiceSeed {
        id:    id.to_string(),
        name:  name.to_string(),
        icon:  Some(icon.to_string()),
        color: Some(color.to_string()),
        base_price,
        average_price,
        buy_margin,
        sell_margin,
        volumes,
    }
}

fn volumes(volume_24h: f64) -> VolumeProfile {
    VolumeProfile {
        volume_24h,
        volume_1h:  Some((volume_24h / 24.0).round()),
        volume_6h:  Some((volume_24h / 4.0).round()),
        volume_8h:  Some((volume_24h / 3.0).round()),
        volume_12h: Some((volume_24h / 2.0).round()),
    }
}

/// Default services, in display order.
pub fn default_services() -> Vec<ServiceSeed> {
    vec![
        seed("btc-usd",  "Bitcoin (BTC)",    "bitcoin",  "#F7931A", 64_000.0, 63_500.0,  2.0, 1.5, volumes(1_250_000.0)),
        seed("eth-usd",  "Ethereum (ETH)",   "ethereum", "#627EEA",  3_100.0,  3_050.0,  4.0, 2.5, volumes(  820_000.0)),
        seed("usdt-ars", "USDT / ARS P2P",   "tether",   "#26A17B",  1_000.0,  1_020.0,  5.0, 3.0, volumes(  640_000.0)),
        seed("usdc-usd", "USD Coin (USDC)",  "usdc",     "#2775CA",      1.0,      1.0,  1.5, 0.5, volumes(  410_000.0)),
        seed("sol-usd",  "Solana (SOL)",     "solana",   "#14F195",    145.0,    140.0, 12.0, 6.0, volumes(  275_000.0)),
        seed("wire-usd", "Bank Wire (USD)",  "bank",     "#8884D8",      1.0,      1.0, 20.0, 8.0, VolumeProfile {
            volume_24h: 95_000.0,
            ..Default::default()
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MarginStatus, Service};
    use crate::engine::pricing::MarginBounds;

    #[test]
    fn test_seed_is_valid() {
        let seeds  = default_services();
        let bounds = MarginBounds::DEFAULT;

        let mut ids: Vec<&str> = seeds.iter().map(|s| s.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), seeds.len(), "seed ids must be unique");

        for s in &seeds {
            assert!(s.base_price > 0.0 && s.average_price > 0.0, "{}", s.id);
            assert!(bounds.contains(s.buy_margin) && bounds.contains(s.sell_margin), "{}", s.id);
            assert!(Service::from_seed(s).is_ok());
        }
    }

    #[test]
    fn test_seed_covers_every_status() {
        let services: Vec<Service> = default_services()
            .iter()
            .map(|s| Service::from_seed(s).unwrap())
            .collect();

        for status in [MarginStatus::Optimal, MarginStatus::Attention, MarginStatus::Alert] {
            assert!(
                services.iter().any(|s| s.buy_status() == status || s.sell_status() == status),
                "no seeded service shows {status:?}"
            );
        }
    }
}
