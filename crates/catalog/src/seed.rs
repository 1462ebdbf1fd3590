//! Bundled storefront catalog.

use slumber_core::{Price, ProductId};

use crate::product::{Category, Product};

pub(crate) fn products() -> Vec<Product> {
    vec![
        Product::new(
            ProductId::new(1),
            "Ортопедическая подушка Memory",
            Category::Pillows,
            Price::new(3500),
        )
        .with_image("🛏️")
        .with_description("Подушка с эффектом памяти принимает форму головы и шеи, снимая напряжение с позвоночника.")
        .with_features([
            "Пена с эффектом памяти",
            "Съёмный чехол из бамбука",
            "Размер 60×40 см",
            "Гипоаллергенно",
        ]),
        Product::new(
            ProductId::new(2),
            "Пуховая подушка Classic",
            Category::Pillows,
            Price::new(4200),
        )
        .with_image("☁️")
        .with_description("Мягкая подушка из натурального гусиного пуха для тех, кто любит классический комфорт.")
        .with_features([
            "Гусиный пух 90%",
            "Хлопковый тик",
            "Размер 70×70 см",
        ]),
        Product::new(
            ProductId::new(3),
            "Подушка для путешествий",
            Category::Pillows,
            Price::new(1500),
        )
        .with_image("✈️")
        .with_description("Компактная подушка-рогалик для сна в дороге.")
        .with_features([
            "Поддержка шеи",
            "Складывается в чехол",
            "Моющийся чехол",
        ]),
        Product::new(
            ProductId::new(4),
            "Охлаждающая подушка Gel",
            Category::Pillows,
            Price::new(5100),
        )
        .with_image("❄️")
        .with_description("Гелевый слой отводит тепло и сохраняет прохладу всю ночь.")
        .with_features([
            "Охлаждающий гель",
            "Пена средней жёсткости",
            "Размер 60×40 см",
        ]),
        Product::new(
            ProductId::new(5),
            "Матрас Comfort Plus",
            Category::Mattresses,
            Price::new(25_000),
        )
        .with_image("🛌")
        .with_description("Матрас на независимых пружинах с анатомическим эффектом.")
        .with_features([
            "Независимый пружинный блок",
            "Средняя жёсткость",
            "Высота 22 см",
            "Гарантия 10 лет",
        ]),
        Product::new(
            ProductId::new(6),
            "Беспружинный матрас Latex",
            Category::Mattresses,
            Price::new(38_900),
        )
        .with_image("🌿")
        .with_description("Натуральный латекс обеспечивает упругую поддержку и хорошую вентиляцию.")
        .with_features([
            "Натуральный латекс",
            "Жёсткость выше средней",
            "Высота 18 см",
        ]),
        Product::new(
            ProductId::new(7),
            "Детский матрас Baby Dream",
            Category::Mattresses,
            Price::new(9900),
        )
        .with_image("🧸")
        .with_description("Матрас для детской кроватки с кокосовой койрой и хлопковым чехлом.")
        .with_features([
            "Кокосовая койра",
            "Двусторонний",
            "Размер 120×60 см",
        ]),
        Product::new(
            ProductId::new(8),
            "Топпер Soft Touch",
            Category::Mattresses,
            Price::new(7800),
        )
        .with_image("🧺")
        .with_description("Тонкий топпер освежит старый матрас или выровняет диван.")
        .with_features([
            "Пена с эффектом памяти",
            "Высота 5 см",
            "Резинки по углам",
        ]),
    ]
}
