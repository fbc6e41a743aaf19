/// Library version reported to the page.
pub const VERSION: &str = "1.0.0";

/// Default name of the cookie holding the basket snapshot.
pub const DEFAULT_COOKIE_NAME: &str = "productData";

/// Default endpoint for per-item create/update calls.
pub const DEFAULT_SERVER_ENDPOINT: &str = "/cart";

/// Quick-add endpoint used by storefronts that expose it separately.
pub const QUICK_ADD_ENDPOINT: &str = "/cart/quickAdd";

/// Path of the basket page, the redirect target after a restore.
pub const BASKET_PAGE_PATH: &str = "/cart";

/// Lifetime of a written snapshot cookie: 1.57785e10 ms.
pub const COOKIE_TTL_MILLIS: i64 = 15_778_500_000;

/// `expires` value that forces a browser to drop a cookie.
pub const COOKIE_EPOCH_EXPIRY: &str = "Thu, 01 Jan 1970 00:00:00 UTC";

/// Suffix appended to the SKU to form an item's quantity key.
pub const QTY_KEY_SUFFIX: &str = ".qty";

/// Basket row elements on the basket page.
pub const BASKET_ROW_SELECTOR: &str = ".shoppingCartDet tbody tr";
/// SKU text inside a basket row.
pub const ITEM_SKU_SELECTOR: &str = ".item-sku";
/// Quantity input inside a basket row.
pub const ITEM_QTY_SELECTOR: &str = ".item-qty";

/// Quick cart header: item count.
pub const HEADER_ITEMS_SELECTOR: &str = "div.quickCartSection li.items span";
/// Quick cart header: total value.
pub const HEADER_VALUE_SELECTOR: &str = "div.quickCartSection li.total span";

/// Class on `<body>` that marks the basket page.
pub const BASKET_PAGE_CLASS: &str = "pageShoppingCart";

/// Delete buttons next to basket rows.
pub const DELETE_BUTTON_SELECTOR: &str = "button.dlt";
