pub use super::investment_recommendations::Entity as InvestmentRecommendations;
pub use super::market_data::Entity as MarketData;
pub use super::risk_alerts::Entity as RiskAlerts;
pub use super::risk_analyses::Entity as RiskAnalyses;
pub use super::rwa_projects::Entity as RwaProjects;
