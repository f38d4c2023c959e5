// DTOs for Product. Missing create fields fall back to catalogue defaults.
#[derive(Debug, Clone, Default)]
pub struct ProductCreate {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}

#[derive(Debug, Clone, Default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub image: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<u32>,
}
