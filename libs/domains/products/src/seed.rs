//! Bundled starter catalog for `POST /admin/seed`.

use crate::models::{CreateProduct, Gender};

fn item(
    title: &str,
    price: f64,
    stock: i32,
    sizes: &[&str],
    gender: Gender,
    tags: &[&str],
    images: &[&str],
) -> CreateProduct {
    let mut product = CreateProduct::new(title).with_images(images.iter().copied());
    product.price = price;
    product.stock = stock;
    product.sizes = sizes.iter().map(|s| s.to_string()).collect();
    product.gender = gender;
    product.tags = tags.iter().map(|s| s.to_string()).collect();
    product
}

/// Slugs are derived from the titles.
pub fn initial_catalog() -> Vec<CreateProduct> {
    let mut catalog = vec![
        item(
            "Men's Chill Crew Neck Sweatshirt",
            75.0,
            7,
            &["XS", "S", "M", "L", "XL", "XXL"],
            Gender::Men,
            &["sweatshirt"],
            &["1740176-00-A_0_2000.jpg", "1740176-00-A_1.jpg"],
        ),
        item(
            "Women's Cropped Puffer Jacket",
            225.0,
            4,
            &["XS", "S", "M"],
            Gender::Women,
            &["jacket"],
            &["1740535-00-A_0_2000.jpg", "1740535-00-A_1.jpg"],
        ),
        item(
            "Kids Cyberquad Bomber Jacket",
            65.0,
            10,
            &["XS", "S", "M"],
            Gender::Kid,
            &["jacket", "kids"],
            &["1742702-00-A_0_2000.jpg"],
        ),
        item(
            "Relaxed T Logo Hat",
            30.0,
            50,
            &[],
            Gender::Unisex,
            &["hat"],
            &["1657891-00-A_0_2000.jpg", "1657891-00-A_1.jpg"],
        ),
    ];

    catalog[0].description = Some(
        "Midweight heather gray sweatshirt with a subtle embroidered logo on the chest."
            .to_string(),
    );

    catalog
}
