//! Demo catalog seeding

use rust_decimal::Decimal;

use super::models::{NewCatalogItem, SeedResponse};
use crate::error::Result;
use crate::store::CatalogStore;

/// The three listings written into an empty catalog.
pub fn demo_items() -> Vec<NewCatalogItem> {
    vec![
        NewCatalogItem {
            name: "Neon Runner".into(),
            description: Some("Stylized cyberpunk runner with glowing accents".into()),
            price: Decimal::from(29),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1542751371-adc38448a05e?w=800&q=80&auto=format&fit=crop"
                    .into(),
            ),
            preview_url: Some("https://youtu.be/dQw4w9WgXcQ".into()),
            tags: tags(&["cyberpunk", "stylized", "game-ready"]),
            formats: tags(&["FBX", "GLB"]),
            polycount: Some("28k tris".into()),
            rigged: true,
            animated: true,
            rating: Some(4.6),
            downloads: 0,
        },
        NewCatalogItem {
            name: "Forest Guardian".into(),
            description: Some("Fantasy archer with cloak and light armor".into()),
            price: Decimal::from(39),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1605721911519-3dfeb3be25e7?w=800&q=80&auto=format&fit=crop"
                    .into(),
            ),
            preview_url: None,
            tags: tags(&["fantasy", "archer", "PBR"]),
            formats: tags(&["FBX", "OBJ"]),
            polycount: Some("32k tris".into()),
            rigged: true,
            animated: false,
            rating: Some(4.8),
            downloads: 0,
        },
        NewCatalogItem {
            name: "Mech Scout".into(),
            description: Some("Compact sci-fi mech with emissive details".into()),
            price: Decimal::from(24),
            thumbnail_url: Some(
                "https://images.unsplash.com/photo-1517694712202-14dd9538aa97?w=800&q=80&auto=format&fit=crop"
                    .into(),
            ),
            preview_url: None,
            tags: tags(&["sci-fi", "mech", "low-poly"]),
            formats: tags(&["GLB"]),
            polycount: Some("18k tris".into()),
            rigged: false,
            animated: false,
            rating: Some(4.2),
            downloads: 0,
        },
    ]
}

fn tags(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Writes the demo listings when the catalog is empty.
///
/// Guarded on the collection being empty rather than on content, so calling
/// it repeatedly never duplicates anything.
pub async fn seed_demo_items(store: &dyn CatalogStore) -> Result<SeedResponse> {
    let existing = store.count().await?;
    if existing > 0 {
        tracing::info!(existing, "Catalog already seeded");
        return Ok(SeedResponse {
            seeded: false,
            count: None,
            message: Some("Collection already has documents".to_string()),
        });
    }

    let items = demo_items();
    for item in &items {
        item.validate()?;
    }

    let count = store.insert_many(items).await?;
    tracing::info!(count, "Seeded demo catalog");

    Ok(SeedResponse {
        seeded: true,
        count: Some(count),
        message: None,
    })
}
