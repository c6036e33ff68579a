//! Fixture data the simulator starts from.
//!
//! The users cover an admin, a diner and enough extra diners to fill more
//! than one page of the user list at the default page size.

use serde_json::{Map, Value};

use super::models::{
    Franchise, FranchiseAdmin, MenuItem, Order, OrderItem, Role, Store, User,
};

/// First id handed out to a registered user.
pub const NEXT_USER_ID: u64 = 15;

/// First id handed out to a created franchise.
pub const NEXT_FRANCHISE_ID: u64 = 5;

/// First id handed out to a created store.
pub const NEXT_STORE_ID: u64 = 8;

/// Seeded users, in store insertion order.
pub fn seed_users() -> Vec<User> {
    let users: [(&str, &str, &str, &str, Role); 12] = [
        ("3", "Kai Chen", "d@jwt.com", "a", Role::Diner),
        ("1", "Admin User", "a@jwt.com", "admin", Role::Admin),
        ("4", "pizza diner", "pizza.diner@jwt.com", "diner123", Role::Diner),
        ("5", "Sarah Connor", "sarah.connor@jwt.com", "terminator", Role::Diner),
        ("6", "John Doe", "john.doe@jwt.com", "password", Role::Diner),
        ("7", "Amy Smith", "amy.smith@jwt.com", "pw123", Role::Diner),
        ("8", "Jason Lee", "jason.lee@jwt.com", "pw123", Role::Diner),
        ("9", "Mia Kim", "mia.kim@jwt.com", "pw123", Role::Diner),
        ("10", "Alex Tan", "alex.tan@jwt.com", "pw123", Role::Diner),
        ("11", "Lucas Ng", "lucas.ng@jwt.com", "pw123", Role::Diner),
        ("12", "Emily Wu", "emily.wu@jwt.com", "pw123", Role::Diner),
        ("13", "Robert Fox", "robert.fox@jwt.com", "pw123", Role::Diner),
    ];

    users
        .into_iter()
        .map(|(id, name, email, password, role)| User::new(id, name, email, password, role))
        .collect()
}

fn admin(id: u32, name: &str, email: &str) -> FranchiseAdmin {
    let mut details = Map::new();
    details.insert("email".to_string(), Value::from(email));
    FranchiseAdmin {
        id,
        name: name.to_string(),
        details,
    }
}

fn store(id: u64, name: &str, total_revenue: f64) -> Store {
    Store {
        id,
        name: name.to_string(),
        total_revenue,
    }
}

/// Seeded franchises with their stores.
pub fn seed_franchises() -> Vec<Franchise> {
    vec![
        Franchise {
            id: 1,
            name: "pizzaPocket".to_string(),
            admins: vec![admin(4, "pizza franchisee", "f@jwt.com")],
            stores: vec![store(1, "Test Store", 0.1)],
        },
        Franchise {
            id: 2,
            name: "LotaPizza".to_string(),
            admins: vec![admin(5, "John Doe", "john@jwt.com")],
            stores: vec![
                store(4, "Lehi", 0.0),
                store(5, "Springville", 0.0),
                store(6, "American Fork", 0.0),
            ],
        },
        Franchise {
            id: 3,
            name: "PizzaCorp".to_string(),
            admins: vec![admin(6, "Jane Smith", "jane@jwt.com")],
            stores: vec![store(7, "Spanish Fork", 0.0)],
        },
        Franchise {
            id: 4,
            name: "topSpot".to_string(),
            admins: vec![admin(7, "Bob Johnson", "bob@jwt.com")],
            stores: vec![],
        },
    ]
}

/// The static menu.
pub fn menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            id: 1,
            title: "Veggie".to_string(),
            image: "pizza1.png".to_string(),
            price: 0.0038,
            description: "A garden of delight".to_string(),
        },
        MenuItem {
            id: 2,
            title: "Pepperoni".to_string(),
            image: "pizza2.png".to_string(),
            price: 0.0042,
            description: "Spicy treat".to_string(),
        },
    ]
}

/// The single historical order every diner sees.
pub fn order_history() -> Vec<Order> {
    vec![Order {
        id: 1,
        franchise_id: 1,
        store_id: 1,
        date: "2024-10-10T12:00:00.000Z".to_string(),
        items: vec![
            OrderItem {
                menu_id: 1,
                description: "Veggie".to_string(),
                price: 0.0038,
            },
            OrderItem {
                menu_id: 2,
                description: "Pepperoni".to_string(),
                price: 0.0042,
            },
        ],
    }]
}
