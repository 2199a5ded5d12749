//! Shared handler state

use crate::core::auth::AuthProvider;
use crate::core::repository::Repository;
use crate::core::store::RecordStore;
use crate::entities::{Artwork, Award, Category, HeroSlide, Message, Photography};
use std::sync::Arc;

/// Application state shared across handlers
///
/// Every repository points at the same record store.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub auth: Arc<dyn AuthProvider>,
    pub artworks: Repository<Artwork>,
    pub categories: Repository<Category>,
    pub hero_slides: Repository<HeroSlide>,
    pub awards: Repository<Award>,
    pub photography: Repository<Photography>,
    pub messages: Repository<Message>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self {
            artworks: Repository::new(store.clone()),
            categories: Repository::new(store.clone()),
            hero_slides: Repository::new(store.clone()),
            awards: Repository::new(store.clone()),
            photography: Repository::new(store.clone()),
            messages: Repository::new(store.clone()),
            store,
            auth,
        }
    }
}
