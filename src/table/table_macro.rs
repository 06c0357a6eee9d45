#[macro_export]
macro_rules! route_table {
    {$($method:literal => { $($key:expr => $endpoint:expr),* $(,)? }),* $(,)?} => {{
        #[allow(unused_mut)]
        let mut __table = $crate::table::RouteTable::new();
        $({
            let __block = __table.method($method);
            $(__block.insert($key, $endpoint);)*
        })*
        __table
    }};
}

#[macro_export]
macro_rules! route_group {
    {$($key:expr => $endpoint:expr),* $(,)?} => {{
        #[allow(unused_mut)]
        let mut __group = $crate::table::RouteGroup::new();
        $(__group.insert($key, $endpoint);)*
        __group
    }};
}
