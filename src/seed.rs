// src/seed.rs
//
// Data written on first start when the store has no products or users yet.

use once_cell::sync::Lazy;

use crate::models::{Category, Product, Role, UserRecord};

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    category: Category,
    fabric: &'static str,
    description: &'static str,
    original_price: i64,
    discount_price: i64,
    discount_percent: i64,
    stock: bool,
    trending: bool,
    images: &'static [&'static str],
    sizes: &'static [&'static str],
    colors: &'static [&'static str],
}

impl SeedProduct {
    fn to_product(&self) -> Product {
        Product {
            id: self.id.to_string(),
            name: self.name.to_string(),
            category: self.category,
            fabric: Some(self.fabric.to_string()),
            description: self.description.to_string(),
            original_price: self.original_price,
            discount_price: self.discount_price,
            discount_percent: self.discount_percent,
            stock: self.stock,
            images: self.images.iter().map(|s| s.to_string()).collect(),
            trending: self.trending.then_some(true),
            sizes: Some(self.sizes.iter().map(|s| s.to_string()).collect()),
            colors: Some(self.colors.iter().map(|s| s.to_string()).collect()),
        }
    }
}

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Elegant Rani Pink Kurti",
        category: Category::Kurti,
        fabric: "Cotton",
        description: "Beautiful hand-embroidered kurti perfect for festive occasions. Features intricate threadwork and comfortable cotton fabric.",
        original_price: 2499,
        discount_price: 1799,
        discount_percent: 28,
        stock: true,
        trending: true,
        images: &[
            "https://images.unsplash.com/photo-1610030469983-98e550d6193c?w=800",
            "https://images.unsplash.com/photo-1583391733956-6c78276477e2?w=800",
        ],
        sizes: &["S", "M", "L", "XL", "XXL"],
        colors: &["#C2185B", "#FF7043", "#FFD54F"],
    },
    SeedProduct {
        id: "2",
        name: "Royal Blue Kurta Set",
        category: Category::KurtaSets,
        fabric: "Silk Blend",
        description: "Complete kurta set with palazzo and dupatta. Perfect for weddings and festive celebrations.",
        original_price: 3999,
        discount_price: 2999,
        discount_percent: 25,
        stock: true,
        trending: true,
        images: &[
            "https://images.unsplash.com/photo-1617627143750-d86bc21e42bb?w=800",
            "https://images.unsplash.com/photo-1611916656173-875e4277bea6?w=800",
        ],
        sizes: &["S", "M", "L", "XL"],
        colors: &["#1565C0", "#C2185B", "#4A148C"],
    },
    SeedProduct {
        id: "3",
        name: "Traditional Silk Saree",
        category: Category::Sarees,
        fabric: "Pure Silk",
        description: "Luxurious silk saree with golden border. Timeless elegance for special occasions.",
        original_price: 8999,
        discount_price: 6499,
        discount_percent: 28,
        stock: true,
        trending: false,
        images: &[
            "https://images.unsplash.com/photo-1610030469046-98bf6c561251?w=800",
            "https://images.unsplash.com/photo-1583391265492-eb4a7b5d03f3?w=800",
        ],
        sizes: &["Free Size"],
        colors: &["#D32F2F", "#C2185B", "#4A148C"],
    },
    SeedProduct {
        id: "4",
        name: "Designer Lehenga Set",
        category: Category::Lehengas,
        fabric: "Georgette",
        description: "Stunning lehenga choli with intricate embroidery and sequin work. Perfect for weddings.",
        original_price: 12999,
        discount_price: 9999,
        discount_percent: 23,
        stock: true,
        trending: true,
        images: &[
            "https://images.unsplash.com/photo-1595777457583-95e059d581b8?w=800",
            "https://images.unsplash.com/photo-1610030469046-98bf6c561251?w=800",
        ],
        sizes: &["S", "M", "L", "XL"],
        colors: &["#C2185B", "#FFD54F", "#1565C0"],
    },
    SeedProduct {
        id: "5",
        name: "Cotton Palazzo Pants",
        category: Category::Palazzos,
        fabric: "Cotton",
        description: "Comfortable cotton palazzo pants with elastic waist. Perfect for daily wear.",
        original_price: 899,
        discount_price: 599,
        discount_percent: 33,
        stock: true,
        trending: false,
        images: &["https://images.unsplash.com/photo-1594633313593-bab3825d0caf?w=800"],
        sizes: &["S", "M", "L", "XL", "XXL"],
        colors: &["#212121", "#C2185B", "#1565C0"],
    },
    SeedProduct {
        id: "6",
        name: "Ready to Wear Saree",
        category: Category::ReadyToWearSarees,
        fabric: "Georgette",
        description: "Pre-stitched saree for easy draping. Perfect for working women and quick occasions.",
        original_price: 3499,
        discount_price: 2499,
        discount_percent: 29,
        stock: false,
        trending: false,
        images: &["https://images.unsplash.com/photo-1583391265841-83afd6cbc10e?w=800"],
        sizes: &["Free Size"],
        colors: &["#C2185B", "#FF7043"],
    },
    SeedProduct {
        id: "7",
        name: "Embroidered Dupatta",
        category: Category::Dupattas,
        fabric: "Chiffon",
        description: "Lightweight chiffon dupatta with delicate embroidery. Pairs perfectly with any outfit.",
        original_price: 799,
        discount_price: 499,
        discount_percent: 38,
        stock: true,
        trending: false,
        images: &["https://images.unsplash.com/photo-1617519019082-2964fcdc29ad?w=800"],
        sizes: &["Free Size"],
        colors: &["#FFD54F", "#C2185B", "#FF7043"],
    },
    SeedProduct {
        id: "8",
        name: "Indo Western Gown",
        category: Category::IndoWesternDress,
        fabric: "Net & Silk",
        description: "Fusion wear gown combining traditional and modern elements. Perfect for parties.",
        original_price: 5999,
        discount_price: 4499,
        discount_percent: 25,
        stock: true,
        trending: true,
        images: &["https://images.unsplash.com/photo-1583391265855-4768eadf3e80?w=800"],
        sizes: &["S", "M", "L", "XL"],
        colors: &["#C2185B", "#1565C0", "#4A148C"],
    },
];

pub static DEFAULT_PRODUCTS: Lazy<Vec<Product>> =
    Lazy::new(|| SEED_PRODUCTS.iter().map(SeedProduct::to_product).collect());

pub fn default_users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: "admin-1".to_string(),
            email: "admin@priyascollection.com".to_string(),
            password: "admin123".to_string(),
            role: Role::Admin,
        },
        UserRecord {
            id: "user-1".to_string(),
            email: "user@example.com".to_string(),
            password: "user123".to_string(),
            role: Role::User,
        },
    ]
}
