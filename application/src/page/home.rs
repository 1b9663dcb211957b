//! Home feed page.

use std::fmt;

use service::{
    query,
    read::property::{list, Category},
    Query as _,
};

use crate::{page::Card, AsError, Context, Error};

/// Home feed view.
#[derive(Clone, Debug)]
pub struct Home {
    /// Selected [`Category`].
    pub category: Category,

    /// [`Card`]s of the [`Category`].
    pub cards: Vec<Card>,
}

/// Shows the home feed narrowed to the provided [`Category`].
///
/// # Errors
///
/// Errors if the listings fail to load.
#[tracing::instrument(skip_all, fields(category = %category))]
pub async fn show(ctx: &Context, category: Category) -> Result<Home, Error> {
    let properties = ctx
        .service()
        .execute(query::properties::List::by(list::Filter {
            category,
            ..list::Filter::default()
        }))
        .await
        .map_err(AsError::into_error)?;

    Ok(Home {
        category,
        cards: Card::list(ctx, properties).await,
    })
}

impl fmt::Display for Home {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, category) in Category::ALL.iter().enumerate() {
            let sep = if i == 0 { "" } else { " | " };
            if *category == self.category {
                write!(f, "{sep}[{}]", category.label())?;
            } else {
                write!(f, "{sep}{}", category.label())?;
            }
        }
        writeln!(f)?;

        if self.cards.is_empty() {
            return writeln!(f, "No properties in this category yet.");
        }
        for card in &self.cards {
            writeln!(f, "{card}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod spec {
    use service::read::property::Category;

    use crate::context::test_context;

    use super::show;

    fn ids(home: &super::Home) -> Vec<&str> {
        home.cards
            .iter()
            .map(|c| c.property.id.as_ref())
            .collect()
    }

    #[tokio::test]
    async fn shows_everything_by_default() {
        let ctx = test_context(true).await;

        let home = show(&ctx, Category::All).await.unwrap();

        assert_eq!(ids(&home), ["1", "2", "3", "4", "5", "6"]);
        assert!(home.cards[0].is_favorite);
        assert!(!home.cards[1].is_favorite);
    }

    #[tokio::test]
    async fn narrows_to_category() {
        let ctx = test_context(true).await;

        let home = show(&ctx, Category::City).await.unwrap();
        assert_eq!(ids(&home), ["2", "4"]);
        assert!(home.to_string().contains("[City]"));

        let home = show(&ctx, Category::Cabins).await.unwrap();
        assert_eq!(ids(&home), ["3"]);
    }
}
